//! JSON-RPC 2.0 communication layer for the embedding web page.
//!
//! Implements bidirectional messaging between the Bevy engine and its parent
//! page via iframe postMessage, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Parent window  <──postMessage──>  Bevy (iframe)
//!        │                                │
//!        ├─ Request (with ID) ──────────> │
//!        │                                ├─ Queue explorer command
//!        │ <───────── Response (with ID) ─┤
//!        │                                │
//!        │ <──── Notification (no ID) ────┤
//! ```
//!
//! ## Methods
//!
//! - `toggle_tour`: start or stop the guided tour
//! - `set_category_filter`: `{"category": "Civil"}` or `{"category": null}`
//! - `reset_view`: stop any tour and reframe the scene
//! - `get_category_counts`: points per category
//! - `get_explorer_state`: hover, selection, tour and camera state
//! - `get_fps`: current frame rate
//!
//! ## Notifications
//!
//! `hover_changed`, `selection_changed`, `tour_state_changed`,
//! `explored_item_changed`, `category_counts`, `loading_status` and
//! `fps_update`.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 bidirectional communication system for the parent page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
