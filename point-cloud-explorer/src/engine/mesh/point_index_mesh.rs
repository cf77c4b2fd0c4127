use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

/// Vertices emitted per point: two triangles forming a billboard quad.
pub const VERTICES_PER_POINT: usize = 6;

/// Marker for the rendered point cloud entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PointCloud;

/// Index-only mesh for the point shader. Each vertex position stores its
/// flat index in `x`; the shader looks the point up in the storage buffer.
pub fn create_point_index_mesh(point_count: usize) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    let vertex_count = point_count * VERTICES_PER_POINT;
    let indices: Vec<[f32; 3]> = (0..vertex_count).map(|i| [i as f32, 0.0, 0.0]).collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, indices);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_vertices_per_point() {
        let mesh = create_point_index_mesh(4);
        assert_eq!(mesh.count_vertices(), 24);

        let Some(bevy::render::mesh::VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("expected Float32x3 positions");
        };
        assert_eq!(positions[23], [23.0, 0.0, 0.0]);
    }
}
