//! Shared tuning constants for the point cloud explorer.
//!
//! Values here are compile-time defaults. The explorer's runtime config
//! starts from them and may be overridden by the scene manifest.

/// Orbit camera limits, sensitivities and projection settings.
pub mod camera;

/// Category palette and lookup for classified data items.
pub mod category;

/// Procedural animation timing shared by the point shader and pick proxies.
pub mod animation;

/// Asset paths relative to the asset root.
pub mod path;

/// Pick proxy sizing and click detection thresholds.
pub mod picking;

/// Scripted tour timing and viewpoint sampling ranges.
pub mod tour;
