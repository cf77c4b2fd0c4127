/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 2000.0;

/// Radians of orbit per pixel of pointer drag.
pub const DRAG_SENSITIVITY: f32 = 0.003;

/// World units of pan per pointer pixel at the reference distance.
pub const PAN_SPEED: f32 = 0.015;

/// Pan speed scales linearly with distance relative to this.
pub const PAN_REFERENCE_DISTANCE: f32 = 30.0;

/// Distance change per unit of wheel delta.
pub const ZOOM_SPEED: f32 = 0.1;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Keeps the polar angle off the poles so `looking_at` has a stable up vector.
pub const POLAR_EPSILON: f32 = 0.01;

/// Idle auto-rotate speed in radians per second (0.001 rad/frame at 60 Hz).
pub const AUTO_ROTATE_SPEED: f32 = 0.06;

/// Idle time after the last manual interaction before auto-rotate resumes.
pub const IDLE_RESUME_SECS: f32 = 3.0;

/// Framing margin multiplier applied to the fitted distance.
pub const FIT_OFFSET_RATIO: f32 = 0.6;

/// Distance used when the framed region has no usable extent.
pub const FALLBACK_DISTANCE: f32 = 15.0;

/// Category focus distance as a multiple of the category's largest extent.
pub const CATEGORY_FOCUS_SCALE: f32 = 2.0;

/// Initial polar angle (horizon).
pub const INITIAL_POLAR: f32 = std::f32::consts::FRAC_PI_2;
pub const INITIAL_AZIMUTH: f32 = 0.0;
pub const INITIAL_DISTANCE: f32 = 20.0;

/// Pixels per wheel notch when the platform reports scroll in lines.
pub const LINE_SCROLL_PIXELS: f32 = 100.0;
