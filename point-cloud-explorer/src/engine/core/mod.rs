//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime
//! configuration and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the point material, JSON asset loaders, the
/// loading chain and the ordered explorer loop.
pub mod app_setup;

/// Application state machine and loading status transitions.
pub mod app_state;

/// Runtime tuning for camera, tour and picking, with validation.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
