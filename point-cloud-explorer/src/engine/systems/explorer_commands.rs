use bevy::prelude::*;
use constants::camera::CATEGORY_FOCUS_SCALE;

use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::CameraRig;
use crate::engine::systems::ui_state::ExplorerUiState;

/// Where an explorer command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Rpc,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerAction {
    ToggleTour,
    /// `None` shows every category again and reframes the scene.
    SetCategoryFilter(Option<String>),
    ResetView,
    ClearSelection,
}

/// Event fired by the RPC bridge or keyboard shortcuts.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ExplorerCommand {
    pub action: ExplorerAction,
    pub source: CommandSource,
}

impl ExplorerCommand {
    pub fn new(action: ExplorerAction, source: CommandSource) -> Self {
        Self { action, source }
    }
}

pub fn handle_explorer_commands(
    mut events: EventReader<ExplorerCommand>,
    time: Res<Time>,
    dataset: Res<Dataset>,
    mut filter: ResMut<CategoryFilter>,
    mut rig: ResMut<CameraRig>,
    mut ui_state: ResMut<ExplorerUiState>,
) {
    for command in events.read() {
        match &command.action {
            ExplorerAction::ToggleTour => {
                let active = rig.toggle_tour(time.elapsed_secs());
                info!(
                    "[TOUR] {} via {:?}",
                    if active { "started" } else { "stopped" },
                    command.source
                );
            }
            ExplorerAction::SetCategoryFilter(category) => {
                apply_category_filter(category.clone(), &dataset, &mut filter, &mut rig);

                let selection_hidden = ui_state
                    .selected_item
                    .and_then(|index| dataset.get(index))
                    .is_some_and(|point| !filter.matches(&point.category));
                if selection_hidden {
                    ui_state.selected_item = None;
                }
            }
            ExplorerAction::ResetView => {
                if let Err(error) = rig.reset_view() {
                    warn!("[TOUR] reset view fell back to default distance: {error}");
                }
            }
            ExplorerAction::ClearSelection => {
                ui_state.selected_item = None;
            }
        }
    }
}

fn apply_category_filter(
    category: Option<String>,
    dataset: &Dataset,
    filter: &mut CategoryFilter,
    rig: &mut CameraRig,
) {
    if filter.active() != category.as_deref() {
        filter.set(category.clone());
    }

    let framed = match category {
        Some(category) => match dataset.category_bounds(&category) {
            Some(region) => rig.focus_region(&region, CATEGORY_FOCUS_SCALE),
            None => Ok(()),
        },
        None => rig.reset_view(),
    };

    if let Err(error) = framed {
        warn!("[TOUR] category framing fell back to default distance: {error}");
    }
}

/// Native keyboard shortcuts: T toggles the tour, R resets the view and
/// Escape clears selection and any category filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_explorer_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    filter: Res<CategoryFilter>,
    mut commands: EventWriter<ExplorerCommand>,
) {
    let source = CommandSource::Keyboard;

    if keyboard.just_pressed(KeyCode::KeyT) {
        commands.write(ExplorerCommand::new(ExplorerAction::ToggleTour, source));
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.write(ExplorerCommand::new(ExplorerAction::ResetView, source));
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        commands.write(ExplorerCommand::new(ExplorerAction::ClearSelection, source));
        if filter.active().is_some() {
            commands.write(ExplorerCommand::new(
                ExplorerAction::SetCategoryFilter(None),
                source,
            ));
        }
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_explorer_keyboard_shortcuts() {
    // Commands arrive through RPC only.
}
