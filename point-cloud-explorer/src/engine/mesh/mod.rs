//! Mesh generation for point cloud rendering primitives.
//!
//! The point mesh carries only vertex indices; the point shader expands each
//! point into a camera-facing quad from the storage buffer.

/// Index-only billboard mesh for the animated point shader.
pub mod point_index_mesh;
