use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::assets::dataset::Dataset;
use crate::engine::core::app_state::{FpsText, StatusText};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::systems::ui_state::ExplorerUiState;
use crate::rpc::web_rpc::WebRpcInterface;

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    // Send FPS every 0.5 seconds
    if current_time - *last_send_time < 0.5 {
        return;
    }

    if let Some(value) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
    {
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": value as f32
            }),
        );
        *last_send_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(value) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
        {
            text.0 = format!("FPS: {value:.1}");
        }
    }
}

/// Status line for the native overlay: the loading status while it has
/// something to say, otherwise tour, hover and selection.
pub fn status_line(
    loading_progress: &LoadingProgress,
    ui_state: &ExplorerUiState,
    dataset: &Dataset,
) -> String {
    let status = loading_progress.status();
    if !status.as_str().is_empty() && (status.is_error() || !loading_progress.point_cloud_created) {
        return status.as_str().to_string();
    }

    let title = |index: Option<usize>| {
        index
            .and_then(|i| dataset.get(i))
            .map(|point| point.title.as_str())
    };

    let mut parts = Vec::new();
    if ui_state.tour_active {
        let label = ui_state
            .tour_perspective_label
            .map_or("", |label| label.as_str());
        parts.push(format!("TOUR: {label}"));
        if let Some(explored) = title(ui_state.explored_item) {
            parts.push(format!("EXPLORING: {explored}"));
        }
    }
    if let Some(hovered) = title(ui_state.hovered_item) {
        parts.push(format!("HOVER: {hovered}"));
    }
    if let Some(selected) = title(ui_state.selected_item) {
        parts.push(format!("SELECTED: {selected}"));
    }
    parts.join("  |  ")
}

pub fn status_text_update_system(
    loading_progress: Res<LoadingProgress>,
    ui_state: Res<ExplorerUiState>,
    dataset: Res<Dataset>,
    mut query: Query<&mut Text, With<StatusText>>,
) {
    let line = status_line(&loading_progress, &ui_state, &dataset);
    for mut text in &mut query {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}
