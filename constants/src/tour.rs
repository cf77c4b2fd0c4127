/// Seconds between viewpoint changes while holding.
pub const CHANGE_INTERVAL_SECS: f32 = 5.0;

/// Duration of an eased transition between viewpoints.
pub const TRANSITION_SECS: f32 = 3.0;

pub const MIN_RADIUS: f32 = 8.0;
pub const MAX_RADIUS: f32 = 25.0;
