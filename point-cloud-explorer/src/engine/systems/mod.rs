//! Runtime systems for the explorer loop.
//!
//! Input handling, per-frame camera and picking updates, and publication of
//! explorer state to the frontend and native overlay.

/// Tour, filter and view commands from RPC or keyboard.
pub mod explorer_commands;

/// FPS reporting and the native status overlay.
pub mod fps_tracking;

/// Ordered per-frame systems: animate, pick, present.
pub mod frame_loop;

/// Notifications for changed explorer state.
pub mod notifications;

/// Orbit drag, click selection and wheel zoom.
pub mod pointer_input;

pub mod ui_state;
