use bevy::prelude::*;
use constants::picking::{CLICK_DRAG_THRESHOLD_PX, PROXY_RADIUS};
use serde::{Deserialize, Serialize};

use crate::engine::animation::displacement::{animated_position, point_seed};
use crate::engine::assets::dataset::DataPoint;
use crate::engine::picking::ray::{ray_aabb_hit_t, ray_sphere_hit_t};

/// Which position the pick proxies follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyTracking {
    /// Follow the animated position drawn by the point shader.
    #[default]
    Animated,
    /// Stay at the loaded rest position.
    Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    pub proxy_radius: f32,
    pub click_drag_threshold_px: f32,
    pub tracking: ProxyTracking,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            proxy_radius: PROXY_RADIUS,
            click_drag_threshold_px: CLICK_DRAG_THRESHOLD_PX,
            tracking: ProxyTracking::default(),
        }
    }
}

/// Invisible hit sphere standing in for one data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickProxy {
    pub data_point_index: usize,
    pub center: Vec3,
    pub radius: f32,
}

/// Nearest proxy along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub data_point_index: usize,
    pub t: f32,
}

/// One proxy per data point, indexed identically to the dataset.
///
/// Rebuilt as a whole when the dataset changes. Between rebuilds only the
/// proxy centers move, once per frame in [`PickProxyIndex::refresh`].
#[derive(Resource, Debug, Default)]
pub struct PickProxyIndex {
    proxies: Vec<PickProxy>,
    rest_positions: Vec<Vec3>,
    seeds: Vec<f32>,
    extent: Option<(Vec3, Vec3)>,
}

impl PickProxyIndex {
    /// Replace every proxy with one per point. An empty slice allocates nothing.
    pub fn rebuild(&mut self, points: &[DataPoint], radius: f32) {
        if points.is_empty() {
            *self = Self::default();
            return;
        }

        let rest_positions: Vec<Vec3> = points.iter().map(|p| p.position).collect();
        let seeds = rest_positions.iter().copied().map(point_seed).collect();
        let proxies = rest_positions
            .iter()
            .enumerate()
            .map(|(index, &center)| PickProxy {
                data_point_index: index,
                center,
                radius,
            })
            .collect();

        *self = Self {
            proxies,
            rest_positions,
            seeds,
            extent: None,
        };
        self.update_extent();
    }

    /// Move every proxy to its position at animation `phase`.
    pub fn refresh(&mut self, phase: f32, tracking: ProxyTracking) {
        if self.proxies.is_empty() {
            return;
        }

        for ((proxy, &rest), &seed) in self
            .proxies
            .iter_mut()
            .zip(&self.rest_positions)
            .zip(&self.seeds)
        {
            proxy.center = match tracking {
                ProxyTracking::Animated => animated_position(rest, seed, phase),
                ProxyTracking::Rest => rest,
            };
        }
        self.update_extent();
    }

    /// Nearest proxy hit by `ray` whose index passes `accept`.
    /// Equal distances resolve to the lower index.
    pub fn cast(&self, ray: Ray3d, accept: impl Fn(usize) -> bool) -> Option<PickHit> {
        let (min, max) = self.extent?;
        let origin = ray.origin;
        let direction = ray.direction.as_vec3();

        // Whole-cloud cull before testing individual spheres.
        ray_aabb_hit_t(origin, direction, min, max)?;

        let mut best: Option<PickHit> = None;
        for proxy in &self.proxies {
            let Some(t) = ray_sphere_hit_t(origin, direction, proxy.center, proxy.radius) else {
                continue;
            };
            if best.is_some_and(|hit| t >= hit.t) || !accept(proxy.data_point_index) {
                continue;
            }
            best = Some(PickHit {
                data_point_index: proxy.data_point_index,
                t,
            });
        }
        best
    }

    pub fn proxies(&self) -> &[PickProxy] {
        &self.proxies
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Allocated proxy slots.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.proxies.capacity()
    }

    fn update_extent(&mut self) {
        let mut centers = self.proxies.iter();
        let Some(first) = centers.next() else {
            self.extent = None;
            return;
        };

        let reach = Vec3::splat(first.radius);
        let (min, max) = centers.fold(
            (first.center - reach, first.center + reach),
            |(min, max), proxy| {
                let reach = Vec3::splat(proxy.radius);
                (min.min(proxy.center - reach), max.max(proxy.center + reach))
            },
        );
        self.extent = Some((min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(position: Vec3, category: &str) -> DataPoint {
        DataPoint {
            position,
            category: category.to_string(),
            sub_category: String::new(),
            title: String::new(),
            keywords: Vec::new(),
        }
    }

    fn line_of_points() -> Vec<DataPoint> {
        vec![
            point(Vec3::new(0.0, 0.0, 0.0), "Civil"),
            point(Vec3::new(5.0, 0.0, 0.0), "Penal"),
            point(Vec3::new(10.0, 0.0, 0.0), "Civil"),
        ]
    }

    fn ray_down_z(x: f32) -> Ray3d {
        Ray3d {
            origin: Vec3::new(x, 0.0, 20.0),
            direction: Dir3::NEG_Z,
        }
    }

    #[test]
    fn rebuild_creates_one_proxy_per_point() {
        let mut index = PickProxyIndex::default();
        index.rebuild(&line_of_points(), 1.2);

        assert_eq!(index.len(), 3);
        for (i, proxy) in index.proxies().iter().enumerate() {
            assert_eq!(proxy.data_point_index, i);
            assert_eq!(proxy.radius, 1.2);
        }
    }

    #[test]
    fn empty_dataset_allocates_nothing() {
        let mut index = PickProxyIndex::default();
        index.rebuild(&line_of_points(), 1.2);
        index.rebuild(&[], 1.2);

        assert!(index.is_empty());
        assert_eq!(index.capacity(), 0);
        index.refresh(3.0, ProxyTracking::Animated);
        assert!(index.cast(ray_down_z(0.0), |_| true).is_none());
    }

    #[test]
    fn cast_returns_nearest_hit() {
        let mut index = PickProxyIndex::default();
        index.rebuild(
            &[
                point(Vec3::new(0.0, 0.0, -4.0), "Civil"),
                point(Vec3::new(0.0, 0.0, 3.0), "Civil"),
                point(Vec3::new(0.0, 0.0, 0.0), "Civil"),
            ],
            1.2,
        );

        let hit = index.cast(ray_down_z(0.0), |_| true).unwrap();
        assert_eq!(hit.data_point_index, 1);
        assert!((hit.t - 15.8).abs() < 1e-4);
    }

    #[test]
    fn rejected_points_are_skipped() {
        let mut index = PickProxyIndex::default();
        index.rebuild(
            &[
                point(Vec3::new(0.0, 0.0, 3.0), "Penal"),
                point(Vec3::new(0.0, 0.0, 0.0), "Civil"),
            ],
            1.2,
        );

        let hit = index.cast(ray_down_z(0.0), |i| i != 0).unwrap();
        assert_eq!(hit.data_point_index, 1);
    }

    #[test]
    fn cast_misses_outside_cloud() {
        let mut index = PickProxyIndex::default();
        index.rebuild(&line_of_points(), 1.2);
        assert!(index.cast(ray_down_z(40.0), |_| true).is_none());
    }

    #[test]
    fn refresh_tracks_animated_positions() {
        let points = line_of_points();
        let mut index = PickProxyIndex::default();
        index.rebuild(&points, 1.2);

        index.refresh(2.5, ProxyTracking::Animated);
        for (proxy, point) in index.proxies().iter().zip(&points) {
            let expected = animated_position(point.position, point_seed(point.position), 2.5);
            assert_eq!(proxy.center, expected);
        }

        index.refresh(2.5, ProxyTracking::Rest);
        for (proxy, point) in index.proxies().iter().zip(&points) {
            assert_eq!(proxy.center, point.position);
        }
    }

    #[test]
    fn cast_is_idempotent() {
        let mut index = PickProxyIndex::default();
        index.rebuild(&line_of_points(), 1.2);
        index.refresh(0.75, ProxyTracking::Animated);

        let first = index.cast(ray_down_z(5.0), |_| true);
        for _ in 0..10 {
            assert_eq!(index.cast(ray_down_z(5.0), |_| true), first);
        }
    }
}
