use bevy::prelude::*;

use crate::engine::loading::progress::{LoadingProgress, LoadingStatus};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct StatusText;

// Final transition to running state
pub fn transition_to_running(
    mut loading_progress: ResMut<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.point_cloud_created {
        loading_progress.report(LoadingStatus::Ready);
        info!("→ All systems ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Push loading status changes to the frontend.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_status: Local<Option<LoadingStatus>>,
) {
    let status = loading_progress.status();
    if *last_status == Some(status) {
        return;
    }

    rpc_interface.send_notification(
        "loading_status",
        serde_json::json!({
            "status": status.as_str(),
            "error": status.is_error(),
            "ready": loading_progress.point_cloud_created
        }),
    );
    *last_status = Some(status);
}
