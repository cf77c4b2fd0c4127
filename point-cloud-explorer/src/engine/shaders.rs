/// Animated point cloud material: billboards expanded in the vertex shader
use bevy::render::render_resource::ShaderType;
use bevy::render::storage::ShaderStorageBuffer;
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::animation::{FILTERED_ALPHA, POINT_SIZE, SPIRAL_FREQUENCY};
use constants::category::{colour_components, get_category_colour};
use constants::path::POINT_SHADER_PATH;

use crate::engine::animation::displacement::point_seed;
use crate::engine::assets::dataset::{CategoryFilter, DataPoint};

#[derive(Debug, Clone, Copy, ShaderType)]
#[repr(C)]
pub struct PointCloudUniform {
    pub phase: f32,
    pub point_size: f32,
    pub spiral_frequency: f32,
    pub _padding: f32,
}

impl Default for PointCloudUniform {
    fn default() -> Self {
        Self {
            phase: 0.0,
            point_size: POINT_SIZE,
            spiral_frequency: SPIRAL_FREQUENCY,
            _padding: 0.0,
        }
    }
}

/// Per-point storage buffer entry: rest position, animation seed and
/// category colour with filter alpha in `colour.w`.
#[derive(Debug, Clone, Copy, Default, ShaderType)]
#[repr(C)]
pub struct GpuPoint {
    pub position: Vec3,
    pub seed: f32,
    pub colour: Vec4,
}

/// Build storage entries for `points`, dimming those outside `filter`.
pub fn gpu_points(points: &[DataPoint], filter: &CategoryFilter) -> Vec<GpuPoint> {
    points
        .iter()
        .map(|point| {
            let [r, g, b] = colour_components(get_category_colour(&point.category));
            let alpha = if filter.matches(&point.category) {
                1.0
            } else {
                FILTERED_ALPHA
            };
            GpuPoint {
                position: point.position,
                seed: point_seed(point.position),
                colour: Vec4::new(r, g, b, alpha),
            }
        })
        .collect()
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointCloudMaterial {
    #[uniform(0)]
    pub params: PointCloudUniform,

    #[storage(1, read_only)]
    pub points: Handle<ShaderStorageBuffer>,
}

impl Material for PointCloudMaterial {
    fn vertex_shader() -> ShaderRef {
        POINT_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        POINT_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(category: &str) -> DataPoint {
        DataPoint {
            position: Vec3::new(1.0, 2.0, 3.0),
            category: category.to_string(),
            sub_category: String::new(),
            title: String::new(),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn gpu_points_carry_palette_colour_and_seed() {
        let entries = gpu_points(&[point("Civil")], &CategoryFilter::default());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].colour, Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(entries[0].seed, point_seed(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn filtered_points_are_dimmed() {
        let mut filter = CategoryFilter::default();
        filter.set(Some("Penal".to_string()));

        let entries = gpu_points(&[point("Civil"), point("Penal")], &filter);
        assert_eq!(entries[0].colour.w, FILTERED_ALPHA);
        assert_eq!(entries[1].colour.w, 1.0);
    }
}
