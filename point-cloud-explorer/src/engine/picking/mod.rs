//! Point picking against invisible proxy spheres.

/// One hit sphere per data point, refreshed each frame.
pub mod proxy_index;

/// Ray intersection primitives.
pub mod ray;

/// Cursor picking with drag, tour and filter suppression.
pub mod service;
