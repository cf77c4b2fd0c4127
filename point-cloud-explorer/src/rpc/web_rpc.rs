use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::CameraRig;
use crate::engine::core::app_state::AppState;
use crate::engine::systems::explorer_commands::{CommandSource, ExplorerAction, ExplorerCommand};
use crate::engine::systems::notifications::item_payload;
use crate::engine::systems::ui_state::ExplorerUiState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the frontend
/// and Bevy. Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last flush.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            )
            .add_systems(PostUpdate, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only explorer state a request may inspect.
pub struct RpcContext<'a> {
    pub ui_state: &'a ExplorerUiState,
    pub dataset: &'a Dataset,
    pub filter: &'a CategoryFilter,
    pub rig: &'a CameraRig,
    pub fps: f32,
    /// The explorer loop is running and will apply queued commands.
    pub ready: bool,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    ui_state: Res<ExplorerUiState>,
    dataset: Res<Dataset>,
    filter: Res<CategoryFilter>,
    rig: Res<CameraRig>,
    app_state: Res<State<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut explorer_commands: EventWriter<ExplorerCommand>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    let context = RpcContext {
        ui_state: &ui_state,
        dataset: &dataset,
        filter: &filter,
        rig: &rig,
        fps,
        ready: *app_state.get() == AppState::Running,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut commands = Vec::new();
                let response = handle_rpc_request(&request, &context, &mut commands);

                explorer_commands.write_batch(commands);
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Commands that change explorer state are pushed to `commands` and applied
/// by the explorer loop, so they are refused until that loop runs. Requests
/// without an ID are notifications: their commands still run but no response
/// is produced.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    commands: &mut Vec<ExplorerCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "toggle_tour" | "set_category_filter" | "reset_view" if !context.ready => {
            warn!("RPC {} refused: explorer still loading", request.method);
            Err(RpcError::not_ready())
        }
        "toggle_tour" => handle_toggle_tour(context, commands),
        "set_category_filter" => handle_set_category_filter(&request.params, context, commands),
        "reset_view" => handle_reset_view(commands),
        "get_category_counts" => handle_get_category_counts(context),
        "get_explorer_state" => handle_get_explorer_state(context),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let id = request.id.clone()?;
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    // Only generate responses for requests with IDs.
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_toggle_tour(
    context: &RpcContext,
    commands: &mut Vec<ExplorerCommand>,
) -> Result<serde_json::Value, RpcError> {
    commands.push(ExplorerCommand::new(
        ExplorerAction::ToggleTour,
        CommandSource::Rpc,
    ));

    Ok(serde_json::json!({
        "success": true,
        "requested_active": !context.rig.tour().is_active()
    }))
}

/// Apply or clear the category filter; `null` clears it.
fn handle_set_category_filter(
    params: &serde_json::Value,
    context: &RpcContext,
    commands: &mut Vec<ExplorerCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct CategoryFilterParams {
        category: Option<String>,
    }

    let filter_params = serde_json::from_value::<CategoryFilterParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'category' parameter (string or null)"))?;

    if let Some(category) = &filter_params.category {
        if !context.dataset.has_category(category) {
            return Err(RpcError::invalid_params(&format!(
                "Unknown category: {}",
                category
            )));
        }
    }

    commands.push(ExplorerCommand::new(
        ExplorerAction::SetCategoryFilter(filter_params.category.clone()),
        CommandSource::Rpc,
    ));

    Ok(serde_json::json!({
        "success": true,
        "category": filter_params.category
    }))
}

fn handle_reset_view(commands: &mut Vec<ExplorerCommand>) -> Result<serde_json::Value, RpcError> {
    commands.push(ExplorerCommand::new(
        ExplorerAction::ResetView,
        CommandSource::Rpc,
    ));
    Ok(serde_json::json!({ "success": true }))
}

fn handle_get_category_counts(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "counts": context.dataset.category_counts(),
        "total": context.dataset.len()
    }))
}

fn handle_get_explorer_state(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let ui_state = context.ui_state;
    let camera = context.rig.controller().state();

    Ok(serde_json::json!({
        "hovered_item": item_payload(context.dataset, ui_state.hovered_item),
        "selected_item": item_payload(context.dataset, ui_state.selected_item),
        "explored_item": item_payload(context.dataset, ui_state.explored_item),
        "tour_active": ui_state.tour_active,
        "tour_perspective_label": ui_state.tour_perspective_label.map(|label| label.as_str()),
        "category_filter": context.filter.active(),
        "category_counts": ui_state.category_counts,
        "point_count": context.dataset.len(),
        "camera": {
            "azimuth": camera.azimuth,
            "polar": camera.polar,
            "distance": camera.distance,
            "target": [camera.target.x, camera.target.y, camera.target.z]
        }
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    /// Server error for commands that arrive before loading has finished.
    pub fn not_ready() -> Self {
        Self {
            code: -32002,
            message: "Explorer is still loading".to_string(),
            data: None,
        }
    }
}
