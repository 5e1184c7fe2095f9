use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::time_of_day::MAX_CYCLE_SPEED;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::audio::playback::SoundscapeDirector;
use crate::engine::environment::clock::{DayPhase, EnvironmentClock, TimePreset, format_clock};
use crate::engine::scene::RoomDetail;
use crate::ui::controls::{Control, ControlEvent, ControlSource};
use crate::ui::modals::registry::{ModalKind, ModalRegistry};

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
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing queue for the host page: notifications and request responses.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Queue a one-way notification for the host page.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Bridges the canvas iframe and its host page over `postMessage`.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // The listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message text received from the host page.
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

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    clock: Res<EnvironmentClock>,
    director: Res<SoundscapeDirector>,
    detail: Res<RoomDetail>,
    registry: Res<ModalRegistry>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut controls: EventWriter<ControlEvent>,
) {
    let context = RpcContext {
        diagnostics: &diagnostics,
        clock: &clock,
        director: &director,
        detail: *detail,
        registry: &registry,
    };

    for event in events.read() {
        debug!("Received RPC: {}", event.content);

        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut requested = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &context, &mut requested) {
                    rpc_interface.queue_response(response);
                }
                for control in requested {
                    controls.write(ControlEvent {
                        control,
                        source: ControlSource::Rpc,
                    });
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Read-only state answered by query methods.
struct RpcContext<'a> {
    diagnostics: &'a DiagnosticsStore,
    clock: &'a EnvironmentClock,
    director: &'a SoundscapeDirector,
    detail: RoomDetail,
    registry: &'a ModalRegistry,
}

/// Handle one request. Controls are applied whether or not the caller wants a
/// response; only requests with an ID get one.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    controls: &mut Vec<Control>,
) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        warn!("Rejected RPC with version {:?}", request.jsonrpc);
        return request.id.clone().map(|id| {
            create_error_response(id, -32600, "Invalid request", None)
        });
    }

    let result = match request.method.as_str() {
        "get_environment" => Ok(environment_report(context)),
        "get_fps" => handle_get_fps(context.diagnostics),
        method => match parse_control(method, &request.params) {
            Ok(Some(control)) => {
                info!("RPC control: {:?}", control);
                controls.push(control);
                Ok(serde_json::json!({ "success": true }))
            }
            Ok(None) => {
                warn!("Unknown RPC method: {}", request.method);
                return request.id.clone().map(|id| {
                    create_error_response(
                        id,
                        -32601,
                        "Method not found",
                        Some(serde_json::json!({"method": request.method})),
                    )
                });
            }
            Err(error) => Err(error),
        },
    };

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

#[derive(Deserialize)]
struct TimeParams {
    time: f32,
}

#[derive(Deserialize)]
struct SpeedParams {
    speed: f32,
}

#[derive(Deserialize)]
struct PresetParams {
    preset: String,
}

#[derive(Deserialize)]
struct KindParams {
    kind: String,
}

#[derive(Deserialize)]
struct EnabledParams {
    enabled: bool,
}

fn parse_params<T: DeserializeOwned>(params: &serde_json::Value, expected: &str) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone())
        .map_err(|_| RpcError::invalid_params(&format!("Expected '{expected}' parameter")))
}

fn modal_kind(params: &serde_json::Value) -> Result<ModalKind, RpcError> {
    let parsed: KindParams = parse_params(params, "kind")?;
    ModalKind::from_string(&parsed.kind)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown modal kind: {}", parsed.kind)))
}

/// Map a control method onto a [`Control`]. `Ok(None)` means the method is not a control.
fn parse_control(method: &str, params: &serde_json::Value) -> Result<Option<Control>, RpcError> {
    let control = match method {
        "set_time_of_day" => {
            let parsed: TimeParams = parse_params(params, "time")?;
            if !parsed.time.is_finite() {
                return Err(RpcError::invalid_params("Time must be a finite number"));
            }
            Control::SetTimeOfDay(parsed.time)
        }
        "set_cycle_speed" => {
            let parsed: SpeedParams = parse_params(params, "speed")?;
            if !(0.0..=MAX_CYCLE_SPEED).contains(&parsed.speed) {
                return Err(RpcError::invalid_params(&format!(
                    "Speed must be within [0, {MAX_CYCLE_SPEED}]"
                )));
            }
            Control::SetCycleSpeed(parsed.speed)
        }
        "set_time_preset" => {
            let parsed: PresetParams = parse_params(params, "preset")?;
            let preset = TimePreset::from_string(&parsed.preset).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown preset: {}", parsed.preset))
            })?;
            Control::SetPreset(preset)
        }
        "set_desk_cue" => {
            let parsed: EnabledParams = parse_params(params, "enabled")?;
            Control::SetDeskCue(parsed.enabled)
        }
        "toggle_sound" => Control::ToggleSound,
        "reset_camera" => Control::ResetCamera,
        "toggle_room_detail" => Control::ToggleRoomDetail,
        "answer_call" => Control::AnswerCall,
        "close_all_modals" => Control::CloseAllModals,
        "close_modal" => Control::CloseModal(modal_kind(params)?),
        "toggle_narration" => Control::ToggleNarration(modal_kind(params)?),
        "open_article" => Control::OpenArticle(modal_kind(params)?),
        _ => return Ok(None),
    };
    Ok(Some(control))
}

fn environment_report(context: &RpcContext) -> serde_json::Value {
    let hours = context.clock.time_of_day();
    let open_modals: Vec<&str> = context
        .registry
        .tracked_kinds()
        .into_iter()
        .map(ModalKind::label)
        .collect();

    serde_json::json!({
        "time": hours,
        "clock": format_clock(hours),
        "phase": DayPhase::at(hours).label(),
        "cycle_speed": context.clock.cycle_speed(),
        "sound": context.director.controller.state(),
        "room_detail": context.detail,
        "open_modals": open_modals,
    })
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
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

/// Flush queued notifications, then responses.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post one serialized message to the parent window.
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
        if let Ok(json) = serde_json::to_string(message) {
            trace!("RPC out: {}", json);
        }
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
