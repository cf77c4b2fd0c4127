//! Procedural point motion evaluated on the CPU.
//!
//! `assets/shaders/point_cloud.wgsl` evaluates the same formula on the GPU,
//! so pick proxies refreshed with the same phase sit where points are drawn.

use std::f32::consts::TAU;

use bevy::prelude::*;
use constants::animation::SPIRAL_FREQUENCY;

/// `x - floor(x)`, matching WGSL `fract` for negative inputs.
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Stable per-point seed in `[0, 1)` hashed from the rest position.
pub fn point_seed(rest: Vec3) -> f32 {
    let p = Vec3::new(
        fract(rest.x * 0.318_309_9 + 0.1),
        fract(rest.y * 0.318_309_9 + 0.1),
        fract(rest.z * 0.318_309_9 + 0.1),
    ) * 17.0;
    fract(p.x * p.y * p.z * (p.x + p.y + p.z))
}

/// Offset from the rest position at animation `phase`.
pub fn displacement(rest: Vec3, seed: f32, phase: f32) -> Vec3 {
    let angle = rest.z.atan2(rest.x) + phase * SPIRAL_FREQUENCY;
    let swirl = (phase + seed * TAU).sin();
    let spiral = Vec3::new(
        angle.cos() * swirl * 0.8,
        (phase * 0.5 + seed * TAU).sin() * 1.2,
        angle.sin() * swirl * 0.8,
    );

    let drift = Vec3::new(
        (phase * 0.6 + seed * 2.0).sin() * 0.5,
        (phase * 0.4 + seed * 1.5).cos() * 0.6,
        (phase * 0.8 + seed * 2.5).sin() * 0.5,
    );

    spiral + drift
}

pub fn animated_position(rest: Vec3, seed: f32, phase: f32) -> Vec3 {
    rest + displacement(rest, seed, phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic_and_in_unit_range() {
        for p in [
            Vec3::ZERO,
            Vec3::new(-12.5, 3.0, 7.25),
            Vec3::new(100.0, -100.0, 0.5),
        ] {
            let seed = point_seed(p);
            assert_eq!(seed, point_seed(p));
            assert!((0.0..1.0).contains(&seed));
        }
    }

    #[test]
    fn displacement_is_bounded() {
        // Spiral reaches at most (0.8, 1.2, 0.8), drift (0.5, 0.6, 0.5).
        let limit = Vec3::new(1.3, 1.8, 1.3).length() + 1e-4;
        for i in 0..500 {
            let rest = Vec3::new(i as f32 * 0.37 - 90.0, (i % 13) as f32, -(i as f32) * 0.11);
            let offset = displacement(rest, point_seed(rest), i as f32 * 0.173);
            assert!(offset.length() <= limit);
        }
    }

    #[test]
    fn animated_position_is_rest_plus_displacement() {
        let rest = Vec3::new(2.0, -1.0, 4.0);
        let seed = point_seed(rest);
        assert_eq!(
            animated_position(rest, seed, 1.5),
            rest + displacement(rest, seed, 1.5)
        );
    }
}
