/// Proxy sphere radius, larger than the rendered point footprint.
pub const PROXY_RADIUS: f32 = 1.2;

/// Maximum pointer travel in pixels for a press and release to count as a click.
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;
