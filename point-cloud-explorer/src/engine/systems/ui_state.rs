use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::engine::camera::tour::PerspectiveLabel;

/// Explorer state observed by the frontend and the native overlay.
///
/// Systems overwrite fields freely; `publish_ui_changes` diffs against the
/// last published snapshot and only notifies what actually changed.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ExplorerUiState {
    pub hovered_item: Option<usize>,
    pub selected_item: Option<usize>,
    pub tour_active: bool,
    pub tour_perspective_label: Option<PerspectiveLabel>,
    pub explored_item: Option<usize>,
    pub category_counts: BTreeMap<String, usize>,
}
