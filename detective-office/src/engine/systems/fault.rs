use bevy::prelude::*;
use bevy::render::renderer::RenderDevice;
use constants::render_settings::RENDERER_WATCHDOG_SECS;

use crate::engine::core::app_state::AppState;
use crate::error::OfficeError;
use crate::rpc::web_rpc::WebRpcInterface;

/// A fatal rendering problem. The scene stops and a recovery screen is shown.
#[derive(Event, Debug, Clone)]
pub struct SceneFault {
    pub reason: String,
}

/// Seconds spent waiting for a render device.
#[derive(Resource, Debug, Default)]
pub struct RendererWatchdog {
    waited: f32,
    tripped: bool,
}

impl RendererWatchdog {
    /// Feed elapsed time. Returns true exactly once, when the wait runs out.
    pub fn tick(&mut self, device_ready: bool, delta_secs: f32) -> bool {
        if device_ready || self.tripped {
            self.waited = 0.0;
            return false;
        }
        self.waited += delta_secs;
        if self.waited >= RENDERER_WATCHDOG_SECS {
            self.tripped = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn watch_render_device(
    device: Option<Res<RenderDevice>>,
    time: Res<Time>,
    mut watchdog: ResMut<RendererWatchdog>,
    mut faults: EventWriter<SceneFault>,
) {
    if watchdog.tick(device.is_some(), time.delta_secs()) {
        let error = OfficeError::RenderFault(format!(
            "no render device after {RENDERER_WATCHDOG_SECS} s"
        ));
        faults.write(SceneFault {
            reason: error.to_string(),
        });
    }
}

/// Stop the scene on the first fault and tell the host page.
pub fn enter_faulted_state(
    mut faults: EventReader<SceneFault>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(fault) = faults.read().last() else {
        return;
    };
    if *state.get() == AppState::Faulted {
        return;
    }
    error!("Scene fault: {}", fault.reason);
    rpc_interface.send_notification(
        "scene_fault",
        serde_json::json!({ "reason": fault.reason }),
    );
    println!("→ Transitioning to Faulted state");
    next_state.set(AppState::Faulted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn watchdog_trips_once() {
        let mut watchdog = RendererWatchdog::default();
        assert!(!watchdog.tick(false, RENDERER_WATCHDOG_SECS / 2.0));
        assert!(watchdog.tick(false, RENDERER_WATCHDOG_SECS / 2.0));
        assert!(!watchdog.tick(false, RENDERER_WATCHDOG_SECS));
    }

    #[test]
    fn a_ready_device_keeps_it_quiet() {
        let mut watchdog = RendererWatchdog::default();
        for _ in 0..100 {
            assert!(!watchdog.tick(true, RENDERER_WATCHDOG_SECS));
        }
    }

    #[test]
    fn faults_move_the_app_to_faulted() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<WebRpcInterface>()
            .add_event::<SceneFault>()
            .add_systems(Update, enter_faulted_state);

        app.world_mut().send_event(SceneFault {
            reason: "adapter lost".into(),
        });
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Faulted
        );
    }
}
