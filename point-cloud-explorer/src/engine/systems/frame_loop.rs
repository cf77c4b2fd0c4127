use bevy::prelude::*;
use bevy::render::storage::ShaderStorageBuffer;
use bevy::window::PrimaryWindow;

use crate::engine::animation::clock::AnimationClock;
use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::{CameraRig, ExplorerCamera};
use crate::engine::core::config::ExplorerConfig;
use crate::engine::picking::proxy_index::PickProxyIndex;
use crate::engine::picking::service::pick_at;
use crate::engine::shaders::{PointCloudMaterial, gpu_points};
use crate::engine::systems::ui_state::ExplorerUiState;

/// Per-frame ordering of the explorer loop. Chained, and only run once
/// loading has finished.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplorerSet {
    /// Pointer, wheel, keyboard and RPC commands.
    Input,
    /// Animation clock, tour and idle rotation.
    Animate,
    /// Proxy refresh and hover picking.
    Pick,
    /// Camera transform, shader parameters and UI publication.
    Present,
}

pub fn advance_camera_rig(time: Res<Time>, dataset: Res<Dataset>, mut rig: ResMut<CameraRig>) {
    rig.tick(time.delta_secs(), time.elapsed_secs(), dataset.len());
}

pub fn refresh_pick_proxies(
    clock: Res<AnimationClock>,
    config: Res<ExplorerConfig>,
    mut proxies: ResMut<PickProxyIndex>,
) {
    proxies.refresh(clock.phase, config.picking.tracking);
}

/// Hover follows the cursor; cleared when the pointer leaves the window.
pub fn update_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Res<CameraRig>,
    proxies: Res<PickProxyIndex>,
    dataset: Res<Dataset>,
    filter: Res<CategoryFilter>,
    mut ui_state: ResMut<ExplorerUiState>,
) {
    let hovered = windows.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        pick_at(&rig, &proxies, &dataset, &filter, cursor, window.size())
    });

    let hovered = hovered.map(|hit| hit.data_point_index);
    if ui_state.hovered_item != hovered {
        ui_state.hovered_item = hovered;
    }
}

pub fn sync_tour_ui(rig: Res<CameraRig>, mut ui_state: ResMut<ExplorerUiState>) {
    let tour = rig.tour();
    let active = tour.is_active();
    let label = tour.perspective_label();
    let explored = tour.explored_item();

    if ui_state.tour_active != active
        || ui_state.tour_perspective_label != label
        || ui_state.explored_item != explored
    {
        ui_state.tour_active = active;
        ui_state.tour_perspective_label = label;
        ui_state.explored_item = explored;
    }
}

/// Orientation is rebuilt from the orbit state every frame. The field of
/// view follows the settings so a manifest override reaches the projection.
pub fn apply_camera_transform(
    rig: Res<CameraRig>,
    mut cameras: Query<(&mut Transform, Option<&mut Projection>), With<ExplorerCamera>>,
) {
    let transform = rig.controller().transform();
    let fov = rig.controller().settings().fov_radians();

    for (mut camera_transform, projection) in &mut cameras {
        *camera_transform = transform;

        if let Some(mut projection) = projection {
            if let Projection::Perspective(perspective) = &mut *projection {
                if (perspective.fov - fov).abs() > f32::EPSILON {
                    perspective.fov = fov;
                }
            }
        }
    }
}

/// Upload the animation phase, and re-upload point colours when the
/// category filter changes.
pub fn update_point_material(
    clock: Res<AnimationClock>,
    filter: Res<CategoryFilter>,
    dataset: Res<Dataset>,
    clouds: Query<&MeshMaterial3d<PointCloudMaterial>>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
) {
    for handle in &clouds {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        material.params.phase = clock.phase;

        if filter.is_changed() {
            if let Some(buffer) = buffers.get_mut(&material.points) {
                buffer.set_data(gpu_points(dataset.points(), &filter));
            }
        }
    }
}
