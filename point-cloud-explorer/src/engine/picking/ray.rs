use bevy::prelude::*;

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let direction = ray_direction[axis];

        // Parallel to this slab: inside it or never.
        if direction == 0.0 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let (mut t_near, mut t_far) = ((min[axis] - origin) * inv, (max[axis] - origin) * inv);
        if t_near > t_far {
            std::mem::swap(&mut t_near, &mut t_far);
        }

        t_enter = t_enter.max(t_near);
        t_exit = t_exit.min(t_far);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}

/// Ray–sphere intersection for a unit-length `ray_direction`.
/// Returns the nearest non-negative `t`, the exit point when the origin is inside.
pub fn ray_sphere_hit_t(ray_origin: Vec3, ray_direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t_far = -b + root;
    if t_far < 0.0 {
        return None;
    }
    let t_near = -b - root;
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
