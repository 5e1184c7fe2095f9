//! JSON-RPC 2.0 bridge between the office canvas and its host page.
//!
//! The app runs inside an iframe; the host page owns the sliders and buttons
//! and talks to the app over `postMessage`.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Office (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ ControlEvent / query
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! Requests without an ID are still applied; they just get no response.
//!
//! ## Methods
//!
//! ### Environment
//! - `set_time_of_day {time}`: hours, wrapped into [0, 24)
//! - `set_cycle_speed {speed}`: 0 stops auto-advance, at most 1
//! - `set_time_preset {preset}`: morning, day, evening or night
//! - `get_environment`: clock, phase, speed, sound state, room detail, open modals
//!
//! ### Session
//! - `toggle_sound`, `reset_camera`, `toggle_room_detail`
//! - `set_desk_cue {enabled}`
//!
//! ### Modals
//! - `answer_call`, `close_all_modals`
//! - `close_modal {kind}`, `toggle_narration {kind}`, `open_article {kind}`
//!
//! ### Diagnostics
//! - `get_fps`
//!
//! ## Notifications
//!
//! `time_of_day_changed`, `sound_state_changed`, `room_detail_changed`,
//! `modal_opened`, `modal_closed`, `hover_changed`, `loading_progress`,
//! `fps_update`, `scene_fault`, `debug_message`.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 message types, the `postMessage` listener and request dispatch.
pub mod web_rpc;
