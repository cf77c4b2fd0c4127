use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        embedded_window()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Point Cloud Explorer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Canvas window inside the host page. Browser defaults are suppressed so
/// wheel zoom does not also scroll the page.
#[cfg(any(target_arch = "wasm32", test))]
fn embedded_window() -> Window {
    Window {
        canvas: Some("#bevy".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_window_keeps_wheel_events_from_the_page() {
        let window = embedded_window();
        assert!(window.prevent_default_event_handling);
        assert_eq!(window.canvas.as_deref(), Some("#bevy"));
    }
}
