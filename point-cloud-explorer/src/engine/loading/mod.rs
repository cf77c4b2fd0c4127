//! Asset loading pipeline for the explorer scene.
//!
//! Resolves the scene manifest, then loads the dataset and reference mesh in
//! parallel. Either may fail without stopping the app: a missing dataset
//! leaves an empty scene and a missing mesh leaves the points on their own.

/// Dataset JSON loading into the [`Dataset`](crate::engine::assets::dataset::Dataset) resource.
pub mod dataset_loader;

/// Scene manifest resolution, config override and follow-up asset loads.
pub mod manifest_loader;

/// Reference glTF loading and bounds extraction.
pub mod mesh_loader;

/// Point cloud entity creation once content has settled.
///
/// Spawns the billboard mesh with its storage buffer, builds pick proxies
/// and frames the camera on the scene.
pub mod point_cloud_creator;

/// Loading progress and user-facing status.
pub mod progress;
