use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::storage::ShaderStorageBuffer;
use bevy::render::view::NoFrustumCulling;

use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::CameraRig;
use crate::engine::core::config::ExplorerConfig;
use crate::engine::loading::mesh_loader::ReferenceMeshLoader;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::mesh::point_index_mesh::{PointCloud, create_point_index_mesh};
use crate::engine::picking::proxy_index::PickProxyIndex;
use crate::engine::shaders::{PointCloudMaterial, PointCloudUniform, gpu_points};
use crate::engine::systems::ui_state::ExplorerUiState;

/// Once dataset and reference mesh have settled, spawn the point cloud,
/// build the pick proxies and frame the scene.
pub fn create_point_cloud_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
    mut proxies: ResMut<PickProxyIndex>,
    mut rig: ResMut<CameraRig>,
    mut ui_state: ResMut<ExplorerUiState>,
    dataset: Res<Dataset>,
    filter: Res<CategoryFilter>,
    mesh_loader: Res<ReferenceMeshLoader>,
    config: Res<ExplorerConfig>,
) {
    if loading_progress.point_cloud_created || !loading_progress.content_settled() {
        return;
    }

    if !dataset.is_empty() {
        let material = PointCloudMaterial {
            params: PointCloudUniform::default(),
            points: buffers.add(ShaderStorageBuffer::from(gpu_points(
                dataset.points(),
                &filter,
            ))),
        };
        spawn_point_cloud_entity(
            &mut commands,
            &mut meshes,
            materials.add(material),
            dataset.len(),
        );
    }

    proxies.rebuild(dataset.points(), config.picking.proxy_radius);

    // Frame the reference mesh when there is one, otherwise the points.
    if let Some(subject) = mesh_loader.bounds().or_else(|| dataset.bounds()) {
        if let Err(error) = rig.set_subject(subject) {
            warn!("[LOAD] cannot frame scene ({error}), using fallback distance");
        }
    }

    ui_state.category_counts = dataset.category_counts().clone();
    loading_progress.point_cloud_created = true;
    info!("Point cloud ready: {} pick proxies", proxies.len());
}

fn spawn_point_cloud_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<PointCloudMaterial>,
    point_count: usize,
) {
    let mesh = create_point_index_mesh(point_count);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::ZERO),
        PointCloud,
        // Vertices are displaced in the shader, so the mesh AABB is meaningless.
        NoFrustumCulling,
        NotShadowCaster,
    ));

    info!("Point cloud entity spawned with {} points", point_count);
}
