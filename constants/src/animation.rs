/// Animation phase advanced per second of elapsed time.
pub const PHASE_PER_SECOND: f32 = 0.5;

/// Angular speed of the spiral drift around the vertical axis.
pub const SPIRAL_FREQUENCY: f32 = 0.3;

/// Alpha multiplier for points outside the active category filter.
pub const FILTERED_ALPHA: f32 = 0.08;

/// Base rendered point size in world units.
pub const POINT_SIZE: f32 = 0.35;
