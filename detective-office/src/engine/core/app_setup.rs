use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::content::case_files::CaseFileTable;
use crate::engine::audio::playback::SoundscapePlugin;
use crate::engine::camera::focus_camera::{
    CameraRig, OfficeCamera, follow_camera_rig, orbit_camera_input,
};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::session::{SessionConfig, apply_session_config};
use crate::engine::core::window_config::create_window_config;
use crate::engine::environment::clock::{
    EnvironmentClock, TimeOfDayChanged, advance_clock_system,
};
use crate::engine::environment::snapshot::{EnvironmentSnapshot, refresh_environment_snapshot};
use crate::engine::loading::content_loader::{ContentLoader, poll_content_load, start_content_load};
use crate::engine::loading::progress::{LoadingProgress, update_loading_progress};
use crate::engine::loading::texture_cache::{
    TextureCache, TextureSwapped, poll_surface_textures, request_surface_textures,
};
use crate::engine::scene::OfficeScenePlugin;
use crate::engine::scene::lighting::fog_settings;
use crate::engine::systems::fault::{
    RendererWatchdog, SceneFault, enter_faulted_state, watch_render_device,
};
use crate::interaction::hover::{
    HoveredObject, apply_hover_cursor, forget_despawned_hover, notify_hover_changes,
    update_hover_labels,
};
use crate::interaction::router::{InteractionActivated, handle_interaction_activations};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::controls::{
    ControlEvent, apply_clock_controls, apply_session_controls, close_modals_on_escape,
    handle_control_shortcuts, notify_time_changes,
};
use crate::ui::modals::presenter::ModalPlugin;
use crate::ui::notices::NoticePlugin;

#[cfg(target_arch = "wasm32")]
use crate::engine::systems::fps_tracking::fps_notification_system;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::ui::hud::{spawn_environment_readout, update_environment_readout};

const LOG_FILTER: &str = "wgpu=error,naga=warn,detective_office=info";

pub fn create_app(session: SessionConfig) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Props are picked by raycasting their meshes.
        .add_plugins(MeshPickingPlugin)
        // Registers the case-file table as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<CaseFileTable>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(OfficeScenePlugin)
        .add_plugins(SoundscapePlugin)
        .add_plugins(ModalPlugin)
        .add_plugins(NoticePlugin);

    // Session-derived resources are replaced by `apply_session_config` at startup.
    app.insert_resource(session)
        .init_resource::<EnvironmentClock>()
        .init_resource::<EnvironmentSnapshot>()
        .init_resource::<CameraRig>()
        .init_resource::<HoveredObject>()
        .init_resource::<TextureCache>()
        .init_resource::<ContentLoader>()
        .init_resource::<LoadingProgress>()
        .init_resource::<RendererWatchdog>()
        .add_event::<TimeOfDayChanged>()
        .add_event::<InteractionActivated>()
        .add_event::<TextureSwapped>()
        .add_event::<ControlEvent>()
        .add_event::<SceneFault>();

    app.add_systems(
        Startup,
        (
            apply_session_config,
            setup,
            request_surface_textures,
            start_content_load,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (
            poll_surface_textures,
            poll_content_load,
            update_loading_progress,
            transition_to_running,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    );

    let environment_systems = (
        apply_clock_controls,
        advance_clock_system,
        refresh_environment_snapshot,
        notify_time_changes,
    )
        .chain();

    let control_systems = (
        handle_control_shortcuts, // Native shortcuts or no-op for WASM
        close_modals_on_escape,
        apply_session_controls,
        handle_interaction_activations,
    )
        .chain();

    let presentation_systems = (
        forget_despawned_hover,
        apply_hover_cursor,
        notify_hover_changes,
        update_hover_labels,
        orbit_camera_input,
        follow_camera_rig,
    );

    app.add_systems(
        Update,
        (
            environment_systems,
            control_systems,
            presentation_systems,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    app.add_systems(
        Update,
        watch_render_device.run_if(not(in_state(AppState::Faulted))),
    )
    .add_systems(Update, enter_faulted_state);

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Update, fps_notification_system);
    }

    // Native overlays stand in for the host page.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (fps_text_update_system, update_environment_readout),
        );
    }

    app
}

fn spawn_office_camera(
    commands: &mut Commands,
    rig: &CameraRig,
    snapshot: &EnvironmentSnapshot,
) {
    commands.spawn((
        Camera3d::default(),
        OfficeCamera,
        rig.target_transform(),
        fog_settings(snapshot),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, rig: Res<CameraRig>, session: Res<SessionConfig>) {
    println!("=== DETECTIVE OFFICE ===");

    let snapshot = EnvironmentSnapshot::at(session.initial_time_of_day);
    spawn_office_camera(&mut commands, &rig, &snapshot);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        FpsText,
    ));
    spawn_environment_readout(commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
