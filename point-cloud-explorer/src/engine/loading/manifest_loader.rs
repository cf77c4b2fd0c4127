use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::rig::CameraRig;
use crate::engine::core::config::ExplorerConfig;
use crate::engine::error::LoadError;
use crate::engine::loading::dataset_loader::DatasetLoader;
use crate::engine::loading::mesh_loader::ReferenceMeshLoader;
use crate::engine::loading::progress::{LoadingProgress, LoadingStatus};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
}

// Start the loading process
pub fn start_loading(
    mut manifest_loader: ResMut<ManifestLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    info!("[LOAD] manifest: {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
    loading_progress.report(LoadingStatus::LoadingData);
}

/// Resolve the manifest (or fall back to built-in paths) and start loading
/// the dataset and reference mesh it names.
pub fn resolve_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<SceneManifest>>,
    asset_server: Res<AssetServer>,
    mut dataset_loader: ResMut<DatasetLoader>,
    mut mesh_loader: ResMut<ReferenceMeshLoader>,
    mut commands: Commands,
) {
    if loading_progress.manifest_resolved {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("✓ Scene manifest loaded");
        manifest.clone()
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        let error = LoadError::Manifest {
            path: MANIFEST_PATH.to_string(),
            reason: error.to_string(),
        };
        warn!("[LOAD] {error}; using built-in paths");
        SceneManifest::default()
    } else {
        return;
    };

    if let Some(config) = manifest.config.as_ref().and_then(validated_override) {
        commands.insert_resource(CameraRig::new(&config));
        commands.insert_resource(config);
    }

    dataset_loader.start(&asset_server, &manifest.dataset);
    mesh_loader.start(&asset_server, manifest.reference_mesh.as_deref());
    loading_progress.report(LoadingStatus::LoadingDataset);
    loading_progress.manifest_resolved = true;
    commands.insert_resource(manifest);
}

/// The manifest's config override, if it passes validation.
fn validated_override(config: &ExplorerConfig) -> Option<ExplorerConfig> {
    match config.validate() {
        Ok(()) => {
            info!("[LOAD] applying config override from manifest");
            Some(config.clone())
        }
        Err(error) => {
            warn!("[LOAD] ignoring config override: {error}");
            None
        }
    }
}
