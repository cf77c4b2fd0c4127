use bevy::prelude::*;
use serde_json::{Value, json};

use crate::engine::assets::dataset::Dataset;
use crate::engine::systems::ui_state::ExplorerUiState;
use crate::rpc::web_rpc::WebRpcInterface;

/// JSON description of a data point for the frontend, `null` when absent.
pub fn item_payload(dataset: &Dataset, index: Option<usize>) -> Value {
    let Some((index, point)) = index.and_then(|i| dataset.get(i).map(|point| (i, point))) else {
        return Value::Null;
    };

    json!({
        "index": index,
        "title": point.title,
        "category": point.category,
        "sub_category": point.sub_category,
        "keywords": point.keywords,
        "position": [point.position.x, point.position.y, point.position.z],
    })
}

/// Forward every field of [`ExplorerUiState`] that changed since the last
/// frame as a notification.
pub fn publish_ui_changes(
    ui_state: Res<ExplorerUiState>,
    dataset: Res<Dataset>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut published: Local<ExplorerUiState>,
) {
    if *ui_state == *published {
        return;
    }

    if ui_state.hovered_item != published.hovered_item {
        rpc_interface.send_notification(
            "hover_changed",
            json!({ "item": item_payload(&dataset, ui_state.hovered_item) }),
        );
    }

    if ui_state.selected_item != published.selected_item {
        rpc_interface.send_notification(
            "selection_changed",
            json!({ "item": item_payload(&dataset, ui_state.selected_item) }),
        );
    }

    if ui_state.tour_active != published.tour_active
        || ui_state.tour_perspective_label != published.tour_perspective_label
    {
        rpc_interface.send_notification(
            "tour_state_changed",
            json!({
                "active": ui_state.tour_active,
                "perspective": ui_state.tour_perspective_label.map(|label| label.as_str()),
            }),
        );
    }

    if ui_state.explored_item != published.explored_item {
        rpc_interface.send_notification(
            "explored_item_changed",
            json!({ "item": item_payload(&dataset, ui_state.explored_item) }),
        );
    }

    if ui_state.category_counts != published.category_counts {
        rpc_interface.send_notification(
            "category_counts",
            json!({ "counts": ui_state.category_counts }),
        );
    }

    *published = ui_state.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::dataset::DataPoint;

    fn dataset() -> Dataset {
        Dataset::from_points(vec![DataPoint {
            position: Vec3::new(1.0, 2.0, 3.0),
            category: "Civil".to_string(),
            sub_category: "Contracts".to_string(),
            title: "Article 12".to_string(),
            keywords: vec!["lease".to_string()],
        }])
    }

    #[test]
    fn payload_describes_point() {
        let payload = item_payload(&dataset(), Some(0));
        assert_eq!(payload["index"], 0);
        assert_eq!(payload["title"], "Article 12");
        assert_eq!(payload["sub_category"], "Contracts");
        assert_eq!(payload["position"][2], 3.0);
    }

    #[test]
    fn missing_item_is_null() {
        assert_eq!(item_payload(&dataset(), None), Value::Null);
        assert_eq!(item_payload(&dataset(), Some(9)), Value::Null);
    }

    fn notification_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(dataset())
            .init_resource::<ExplorerUiState>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, publish_ui_changes);
        app
    }

    #[test]
    fn only_changes_are_published() {
        let mut app = notification_app();
        app.update();
        assert!(app.world().resource::<WebRpcInterface>().pending_notifications().is_empty());

        app.world_mut().resource_mut::<ExplorerUiState>().selected_item = Some(0);
        app.update();
        let methods: Vec<String> = app
            .world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .map(|notification| notification.method.clone())
            .collect();
        assert_eq!(methods, vec!["selection_changed".to_string()]);

        app.update();
        assert_eq!(
            app.world()
                .resource::<WebRpcInterface>()
                .pending_notifications()
                .len(),
            1
        );
    }
}
