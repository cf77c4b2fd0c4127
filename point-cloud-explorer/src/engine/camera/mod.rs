//! Camera control for the explorer scene.
//!
//! An orbit controller for manual navigation, a tour director for automatic
//! viewpoints, and the rig that keeps the two mutually exclusive.

/// Spherical orbit controller with drag, zoom, framing and idle rotation.
pub mod orbit_camera;

/// Single owner of controller and tour; every manual input goes through it.
pub mod rig;

/// Guided tour: random viewpoints with eased transitions.
pub mod tour;
