use bevy::prelude::*;
use constants::time_of_day::{CYCLE_SPEED_STEP, MAX_CYCLE_SPEED, TIME_SLIDER_STEP};
use serde::Serialize;

use super::modals::presenter::ModalEffectQueue;
use super::modals::registry::{ModalKind, ModalRegistry};
use crate::engine::audio::playback::SoundscapeDirector;
use crate::engine::camera::focus_camera::CameraRig;
use crate::engine::core::session::SessionConfig;
use crate::engine::environment::clock::{
    DayPhase, EnvironmentClock, TimeOfDayChanged, TimePreset, format_clock,
};
use crate::engine::scene::RoomDetail;
use crate::rpc::web_rpc::WebRpcInterface;

/// A user-facing control, whichever surface it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    SetTimeOfDay(f32),
    /// Relative change in hours.
    NudgeTimeOfDay(f32),
    SetCycleSpeed(f32),
    CycleSpeedStep,
    SetPreset(TimePreset),
    ToggleSound,
    ResetCamera,
    ToggleRoomDetail,
    SetDeskCue(bool),
    AnswerCall,
    CloseModal(ModalKind),
    CloseAllModals,
    ToggleNarration(ModalKind),
    OpenArticle(ModalKind),
}

/// Source of a control for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSource {
    Rpc,
    Keyboard,
    Ui,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ControlEvent {
    pub control: Control,
    pub source: ControlSource,
}

/// Next cycle speed for the step control: +0.1, back to 0 past the maximum.
pub fn next_cycle_speed(current: f32) -> f32 {
    let next = ((current + CYCLE_SPEED_STEP) * 10.0).round() / 10.0;
    if next > MAX_CYCLE_SPEED + f32::EPSILON {
        0.0
    } else {
        next
    }
}

/// Time, speed and preset controls.
pub fn apply_clock_controls(
    mut events: EventReader<ControlEvent>,
    mut clock: ResMut<EnvironmentClock>,
    mut changes: EventWriter<TimeOfDayChanged>,
) {
    for event in events.read() {
        let hours = match event.control {
            Control::SetTimeOfDay(hours) => Some(clock.set(hours)),
            Control::NudgeTimeOfDay(delta) => {
                let current = clock.time_of_day();
                Some(clock.set(current + delta))
            }
            Control::SetPreset(preset) => Some(clock.set(preset.hour())),
            Control::SetCycleSpeed(speed) => {
                let speed = clock.set_cycle_speed(speed);
                info!("Cycle speed {} via {:?}", speed, event.source);
                None
            }
            Control::CycleSpeedStep => {
                let next = next_cycle_speed(clock.cycle_speed());
                let speed = clock.set_cycle_speed(next);
                info!("Cycle speed {} via {:?}", speed, event.source);
                None
            }
            _ => None,
        };
        if let Some(hours) = hours {
            changes.write(TimeOfDayChanged {
                hours,
                auto_advanced: false,
            });
        }
    }
}

/// Sound, camera, room detail and modal controls.
pub fn apply_session_controls(
    mut events: EventReader<ControlEvent>,
    mut director: ResMut<SoundscapeDirector>,
    mut rig: ResMut<CameraRig>,
    mut detail: ResMut<RoomDetail>,
    mut session: ResMut<SessionConfig>,
    mut registry: ResMut<ModalRegistry>,
    mut effects: ResMut<ModalEffectQueue>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match event.control {
            Control::ToggleSound => {
                debug!("Sound toggle via {:?}", event.source);
                director.toggle();
            }
            Control::ResetCamera => {
                rig.reset();
                info!("Camera reset via {:?}", event.source);
            }
            Control::ToggleRoomDetail => {
                *detail = detail.toggled();
                session.room_detail = *detail;
                info!("Room detail {:?} via {:?}", *detail, event.source);
                rpc_interface.send_notification(
                    "room_detail_changed",
                    serde_json::json!({ "detail": *detail }),
                );
            }
            Control::SetDeskCue(enabled) => {
                session.desk_cue = enabled;
                info!("Desk cue {} via {:?}", enabled, event.source);
            }
            Control::AnswerCall => effects.extend(registry.answer_call()),
            Control::CloseModal(kind) => effects.extend(registry.close(kind)),
            Control::CloseAllModals => effects.extend(registry.close_all()),
            Control::ToggleNarration(kind) => effects.extend(registry.toggle_narration(kind)),
            Control::OpenArticle(kind) => effects.extend(registry.open_article(kind)),
            _ => {}
        }
    }
}

/// Report every time change, manual or automatic.
pub fn notify_time_changes(
    mut changes: EventReader<TimeOfDayChanged>,
    clock: Res<EnvironmentClock>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    // Only the latest change in a frame matters to the host page.
    let Some(change) = changes.read().last() else {
        return;
    };
    rpc_interface.send_notification(
        "time_of_day_changed",
        serde_json::json!({
            "time": change.hours,
            "clock": format_clock(change.hours),
            "phase": DayPhase::at(change.hours).label(),
            "cycle_speed": clock.cycle_speed(),
            "auto_advanced": change.auto_advanced,
        }),
    );
}

/// Escape closes every open modal on all platforms.
pub fn close_modals_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controls: EventWriter<ControlEvent>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        controls.write(ControlEvent {
            control: Control::CloseAllModals,
            source: ControlSource::Keyboard,
        });
    }
}

/// System handling keyboard shortcuts for controls (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_control_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<ModalRegistry>,
    mut controls: EventWriter<ControlEvent>,
) {
    let step = if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        TIME_SLIDER_STEP * 10.0
    } else {
        TIME_SLIDER_STEP
    };

    let mut pressed = Vec::new();
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        pressed.push(Control::NudgeTimeOfDay(-step));
    }
    if keyboard.just_pressed(KeyCode::BracketRight) {
        pressed.push(Control::NudgeTimeOfDay(step));
    }
    for (key, preset) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ]
    .into_iter()
    .zip(TimePreset::ALL)
    {
        if keyboard.just_pressed(key) {
            pressed.push(Control::SetPreset(preset));
        }
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        pressed.push(Control::CycleSpeedStep);
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        pressed.push(Control::ToggleSound);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        pressed.push(Control::ResetCamera);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        pressed.push(Control::ToggleRoomDetail);
    }
    if keyboard.just_pressed(KeyCode::Space) {
        pressed.push(Control::AnswerCall);
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        // Narration belongs to whichever evidence card is open, plain first.
        if let Some(kind) = [ModalKind::Evidence, ModalKind::CryptoEvidence]
            .into_iter()
            .find(|kind| registry.is_tracked(*kind))
        {
            pressed.push(Control::ToggleNarration(kind));
        }
    }

    for control in pressed {
        controls.write(ControlEvent {
            control,
            source: ControlSource::Keyboard,
        });
    }
}

/// Placeholder system for WASM builds where the host page drives controls over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_control_shortcuts() {
    // No keyboard shortcuts in WASM builds - controls arrive via RPC.
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn cycle_speed_steps_and_wraps() {
        assert_eq!(next_cycle_speed(0.0), 0.1);
        assert_eq!(next_cycle_speed(0.5), 0.6);
        assert_eq!(next_cycle_speed(0.9), 1.0);
        assert_eq!(next_cycle_speed(1.0), 0.0);
    }

    fn clock_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_resource(EnvironmentClock::default())
            .add_event::<ControlEvent>()
            .add_event::<TimeOfDayChanged>()
            .add_systems(Update, apply_clock_controls);
        app
    }

    fn send(app: &mut App, control: Control) {
        app.world_mut().send_event(ControlEvent {
            control,
            source: ControlSource::Rpc,
        });
        app.update();
    }

    #[test]
    fn presets_and_nudges_move_the_clock() {
        let mut app = clock_app();
        send(&mut app, Control::SetPreset(TimePreset::Evening));
        assert_eq!(app.world().resource::<EnvironmentClock>().time_of_day(), 19.0);

        send(&mut app, Control::NudgeTimeOfDay(-20.0));
        assert_eq!(app.world().resource::<EnvironmentClock>().time_of_day(), 23.0);

        send(&mut app, Control::SetTimeOfDay(24.0));
        assert_eq!(app.world().resource::<EnvironmentClock>().time_of_day(), 0.0);
    }

    #[test]
    fn manual_changes_are_announced() {
        let mut app = clock_app();
        send(&mut app, Control::SetTimeOfDay(7.5));
        let events = app.world().resource::<Events<TimeOfDayChanged>>();
        let mut cursor = events.get_cursor();
        let change = cursor.read(events).last().copied().unwrap();
        assert_eq!(change.hours, 7.5);
        assert!(!change.auto_advanced);
    }

    #[test]
    fn negative_speed_clamps_to_manual() {
        let mut app = clock_app();
        send(&mut app, Control::SetCycleSpeed(-2.0));
        let clock = app.world().resource::<EnvironmentClock>();
        assert_eq!(clock.cycle_speed(), 0.0);
        assert!(!clock.is_auto_advancing());
    }
}
