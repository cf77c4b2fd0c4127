use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::LINE_SCROLL_PIXELS;

use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::CameraRig;
use crate::engine::core::config::ExplorerConfig;
use crate::engine::picking::proxy_index::PickProxyIndex;
use crate::engine::picking::service::pick_at;
use crate::engine::systems::ui_state::ExplorerUiState;

/// Pointer gesture state: where the left-button press started and where the
/// cursor was last sampled.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    press_origin: Option<Vec2>,
    last_cursor: Option<Vec2>,
}

impl PointerTracker {
    pub fn press(&mut self, cursor: Option<Vec2>) {
        self.press_origin = cursor;
        self.last_cursor = cursor;
    }

    /// Restart delta sampling at `cursor` without starting a click.
    pub fn anchor(&mut self, cursor: Option<Vec2>) {
        self.last_cursor = cursor;
    }

    /// Cursor movement since the previous sample.
    pub fn move_to(&mut self, cursor: Vec2) -> Vec2 {
        let delta = self.last_cursor.map_or(Vec2::ZERO, |last| cursor - last);
        self.last_cursor = Some(cursor);
        delta
    }

    /// End the gesture. Returns whether it counts as a click: the release is
    /// within `threshold` pixels of the press.
    pub fn release(&mut self, cursor: Option<Vec2>, threshold: f32) -> bool {
        let origin = self.press_origin.take();
        self.last_cursor = None;
        match (origin, cursor) {
            (Some(origin), Some(cursor)) => origin.distance(cursor) < threshold,
            _ => false,
        }
    }
}

/// Wheel movement in pixels, positive away from the target.
pub fn wheel_delta(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * LINE_SCROLL_PIXELS,
        MouseScrollUnit::Pixel => -y,
    }
}

/// Orbit drag and click selection from the left mouse button, panning from
/// the middle button.
pub fn handle_pointer_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    config: Res<ExplorerConfig>,
    proxies: Res<PickProxyIndex>,
    dataset: Res<Dataset>,
    filter: Res<CategoryFilter>,
    mut tracker: ResMut<PointerTracker>,
    mut rig: ResMut<CameraRig>,
    mut ui_state: ResMut<ExplorerUiState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();
    let now = time.elapsed_secs();

    if mouse_button.just_pressed(MouseButton::Left) {
        tracker.press(cursor);
        rig.begin_drag(now);
        ui_state.hovered_item = None;
    }

    if mouse_button.just_pressed(MouseButton::Middle) {
        tracker.anchor(cursor);
        rig.begin_pan(now);
        ui_state.hovered_item = None;
    }

    let dragging = mouse_button.pressed(MouseButton::Left) && rig.controller().is_dragging();
    let panning = mouse_button.pressed(MouseButton::Middle) && rig.controller().is_panning();
    if dragging || panning {
        if let Some(cursor) = cursor {
            let delta = tracker.move_to(cursor);
            if delta != Vec2::ZERO {
                if dragging {
                    rig.drag(delta, now);
                } else {
                    rig.pan(delta, now);
                }
            }
        }
    }

    if mouse_button.just_released(MouseButton::Middle) {
        rig.end_pan(now);
    }

    if mouse_button.just_released(MouseButton::Left) {
        let is_click = tracker.release(cursor, config.picking.click_drag_threshold_px);
        rig.end_drag(now);

        if let (true, Some(cursor)) = (is_click, cursor) {
            let hit = pick_at(&rig, &proxies, &dataset, &filter, cursor, window.size());
            ui_state.selected_item = hit.map(|hit| hit.data_point_index);
            debug!("[PICK] click selected {:?}", ui_state.selected_item);
        }
    }
}

pub fn handle_wheel_input(
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
) {
    let delta: f32 = scroll_events
        .read()
        .map(|event| wheel_delta(event.unit, event.y))
        .sum();

    if delta.abs() > f32::EPSILON {
        rig.zoom(delta, time.elapsed_secs());
    }
}
