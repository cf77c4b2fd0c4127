//! Explorer content definitions.
//!
//! Handles the scene manifest, the classified point dataset and the
//! bounding regions used to frame them.

/// Axis-aligned bounding regions for framing and tours.
pub mod bounds;

/// Dataset records, loaded data points, category counts and the category filter.
pub mod dataset;

/// Scene manifest naming the dataset, reference mesh and config overrides.
pub mod scene_manifest;
