use bevy::prelude::*;
use constants::path::{DEFAULT_DATASET_PATH, DEFAULT_MESH_PATH};
use serde::{Deserialize, Serialize};

use crate::engine::core::config::ExplorerConfig;

/// Scene manifest as a Bevy asset. Names the dataset and reference mesh to
/// load and optionally overrides runtime configuration.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default = "default_dataset_path")]
    pub dataset: String,
    /// Reference mesh (glTF/GLB). `null` renders the point cloud alone.
    #[serde(default = "default_mesh_path")]
    pub reference_mesh: Option<String>,
    #[serde(default)]
    pub config: Option<ExplorerConfig>,
}

fn default_dataset_path() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

fn default_mesh_path() -> Option<String> {
    Some(DEFAULT_MESH_PATH.to_string())
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            dataset: default_dataset_path(),
            reference_mesh: default_mesh_path(),
            config: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_default_paths() {
        let manifest: SceneManifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest, SceneManifest::default());
    }

    #[test]
    fn null_mesh_disables_reference_mesh() {
        let manifest: SceneManifest =
            serde_json::from_str(r#"{"dataset": "a.dataset.json", "reference_mesh": null}"#)
                .unwrap();
        assert_eq!(manifest.dataset, "a.dataset.json");
        assert!(manifest.reference_mesh.is_none());
    }

    #[test]
    fn config_override_is_parsed() {
        let manifest: SceneManifest =
            serde_json::from_str(r#"{"config": {"camera": {"max_distance": 60.0}}}"#).unwrap();
        let config = manifest.config.unwrap();
        assert_eq!(config.camera.max_distance, 60.0);
        assert_eq!(config.tour, Default::default());
    }
}
