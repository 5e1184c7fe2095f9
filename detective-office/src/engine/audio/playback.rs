use std::collections::HashMap;
use std::time::Duration;

use bevy::asset::LoadState;
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use constants::audio::{
    DESK_CUE_TRACK, DESK_CUE_VOLUME, NARRATION_TRACK, NARRATION_VOLUME, RINGTONE_TRACK,
    RINGTONE_VOLUME,
};

use super::controller::{
    AudioChannel, AudioCommand, AudioController, LoadStatus, SoundState, ToggleOutcome,
};
use crate::engine::core::app_state::AppState;
use crate::engine::environment::snapshot::EnvironmentSnapshot;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::ui::modals::registry::{ModalKind, ModalRegistry};

/// Marks the looping entity backing an ambient channel.
#[derive(Component, Debug, Clone, Copy)]
pub struct AmbientChannel(pub AudioChannel);

/// Looping sound owned by a modal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSound {
    Ringtone,
    Narration(ModalKind),
}

/// Narration waiting for its sink to appear (or its load to fail).
#[derive(Component)]
pub struct AwaitingPlayback;

#[derive(Debug, Clone, Copy)]
struct ActiveFade {
    channel: AudioChannel,
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
}

impl ActiveFade {
    fn volume(&self) -> f32 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.from + (self.to - self.from) * t
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Owns the soundscape controller and the Bevy handles it drives.
#[derive(Resource)]
pub struct SoundscapeDirector {
    pub controller: AudioController,
    outbox: Vec<AudioCommand>,
    handles: HashMap<AudioChannel, Handle<AudioSource>>,
    players: HashMap<AudioChannel, Entity>,
    fades: Vec<ActiveFade>,
    last_reported: Option<SoundState>,
}

impl SoundscapeDirector {
    pub fn new(hours: f32) -> Self {
        Self {
            controller: AudioController::new(hours),
            outbox: Vec::new(),
            handles: HashMap::new(),
            players: HashMap::new(),
            fades: Vec::new(),
            last_reported: None,
        }
    }

    pub fn toggle(&mut self) -> ToggleOutcome {
        let (outcome, commands) = self.controller.toggle();
        self.outbox.extend(commands);
        match outcome {
            ToggleOutcome::Ignored => info!("Sound toggle ignored while settling"),
            other => info!("Sound toggle: {:?}", other),
        }
        outcome
    }

    pub fn cue(&mut self) {
        let commands = self.controller.cue();
        self.outbox.extend(commands);
    }

    pub fn teardown(&mut self) {
        let commands = self.controller.teardown();
        self.outbox.extend(commands);
    }
}

impl Default for SoundscapeDirector {
    fn default() -> Self {
        Self::new(constants::time_of_day::INITIAL_TIME_OF_DAY)
    }
}

/// Report channel load results back to the controller.
pub fn poll_channel_loads(
    mut director: ResMut<SoundscapeDirector>,
    asset_server: Res<AssetServer>,
) {
    for channel in AudioChannel::ALL {
        if director.controller.channel(channel).status != LoadStatus::Loading {
            continue;
        }
        let Some(handle) = director.handles.get(&channel) else {
            continue;
        };
        match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => {
                println!("✓ Audio channel loaded: {}", channel.track());
                director.controller.load_settled(channel, true);
            }
            Some(LoadState::Failed(err)) => {
                warn!("Audio channel {:?} failed to load: {}", channel, err);
                director.controller.load_settled(channel, false);
            }
            _ => {}
        }
    }
}

/// Step the controller and execute whatever it asks for.
pub fn drive_soundscape(
    mut commands: Commands,
    time: Res<Time>,
    snapshot: Res<EnvironmentSnapshot>,
    asset_server: Res<AssetServer>,
    mut director: ResMut<SoundscapeDirector>,
    mut sinks: Query<(&AmbientChannel, &mut AudioSink)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let retarget = director.controller.set_hours(snapshot.hours);
    let scheduled = director.controller.advance(time.delta());
    let mut pending = std::mem::take(&mut director.outbox);
    pending.extend(retarget);
    pending.extend(scheduled);

    for command in pending {
        execute_command(
            command,
            &mut commands,
            &asset_server,
            &mut director,
            &mut sinks,
        );
    }

    step_fades(&mut director, time.delta(), &mut sinks);

    let state = director.controller.state();
    if director.last_reported != Some(state) {
        director.last_reported = Some(state);
        rpc_interface.send_notification(
            "sound_state_changed",
            serde_json::json!({
                "state": state,
                "enabled": director.controller.is_enabled(),
                "busy": director.controller.is_busy(),
            }),
        );
    }
}

fn execute_command(
    command: AudioCommand,
    commands: &mut Commands,
    asset_server: &AssetServer,
    director: &mut SoundscapeDirector,
    sinks: &mut Query<(&AmbientChannel, &mut AudioSink)>,
) {
    match command {
        AudioCommand::Load(channel) => {
            let handle = asset_server.load(channel.track());
            director.handles.insert(channel, handle);
        }
        AudioCommand::Play { channel, volume } => {
            director.fades.retain(|fade| fade.channel != channel);
            if director.players.contains_key(&channel) {
                if let Some(mut sink) = sink_for(sinks, channel) {
                    sink.set_volume(Volume::Linear(volume));
                    sink.play();
                }
            } else if let Some(handle) = director.handles.get(&channel) {
                let entity = commands
                    .spawn((
                        AudioPlayer::new(handle.clone()),
                        PlaybackSettings::LOOP.with_volume(Volume::Linear(volume)),
                        AmbientChannel(channel),
                        Name::new(format!("Ambient {:?}", channel)),
                    ))
                    .id();
                director.players.insert(channel, entity);
            }
        }
        AudioCommand::Pause(channel) => {
            if let Some(sink) = sink_for(sinks, channel) {
                sink.pause();
            }
        }
        AudioCommand::Fade {
            channel,
            from,
            to,
            duration,
        } => {
            director.fades.retain(|fade| fade.channel != channel);
            director.fades.push(ActiveFade {
                channel,
                from,
                to,
                duration,
                elapsed: Duration::ZERO,
            });
        }
        AudioCommand::SetVolume { channel, volume } => {
            if let Some(mut sink) = sink_for(sinks, channel) {
                sink.set_volume(Volume::Linear(volume));
            }
        }
        AudioCommand::Stop(channel) => {
            director.fades.retain(|fade| fade.channel != channel);
            if let Some(entity) = director.players.remove(&channel) {
                commands.entity(entity).despawn();
            }
        }
        AudioCommand::Unload(channel) => {
            director.handles.remove(&channel);
        }
        AudioCommand::Cue => {
            commands.spawn((
                AudioPlayer::new(asset_server.load(DESK_CUE_TRACK)),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(DESK_CUE_VOLUME)),
            ));
        }
    }
}

fn sink_for<'a>(
    sinks: &'a mut Query<(&AmbientChannel, &mut AudioSink)>,
    channel: AudioChannel,
) -> Option<Mut<'a, AudioSink>> {
    sinks
        .iter_mut()
        .find(|(tag, _)| tag.0 == channel)
        .map(|(_, sink)| sink)
}

fn step_fades(
    director: &mut SoundscapeDirector,
    delta: Duration,
    sinks: &mut Query<(&AmbientChannel, &mut AudioSink)>,
) {
    for fade in director.fades.iter_mut() {
        fade.elapsed += delta;
        if let Some(mut sink) = sink_for(sinks, fade.channel) {
            sink.set_volume(Volume::Linear(fade.volume()));
        }
    }
    director.fades.retain(|fade| !fade.finished());
}

/// Fade everything out when the scene stops running. The fades and stops
/// are carried out by `drive_soundscape`, which keeps running in every state.
pub fn teardown_soundscape(mut director: ResMut<SoundscapeDirector>) {
    director.teardown();
}

/// Start loading with a fresh controller; a torn-down one ignores toggles.
pub fn reset_soundscape(
    mut commands: Commands,
    snapshot: Res<EnvironmentSnapshot>,
    players: Query<Entity, With<AmbientChannel>>,
) {
    for entity in players.iter() {
        commands.entity(entity).despawn();
    }
    commands.insert_resource(SoundscapeDirector::new(snapshot.hours));
}

pub struct SoundscapePlugin;

impl Plugin for SoundscapePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundscapeDirector>()
            .add_systems(OnEnter(AppState::Loading), reset_soundscape)
            .add_systems(OnExit(AppState::Running), teardown_soundscape)
            .add_systems(Update, (poll_channel_loads, drive_soundscape).chain())
            .add_systems(
                Update,
                (confirm_narration_playback, drop_failed_ringtones)
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}

pub fn start_ringtone(commands: &mut Commands, asset_server: &AssetServer) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(RINGTONE_TRACK)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(RINGTONE_VOLUME)),
        ModalSound::Ringtone,
    ));
}

pub fn start_narration(commands: &mut Commands, asset_server: &AssetServer, kind: ModalKind) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(NARRATION_TRACK)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(NARRATION_VOLUME)),
        ModalSound::Narration(kind),
        AwaitingPlayback,
    ));
}

/// Stop a modal-owned loop. Missing sounds are fine (playback may have been blocked).
pub fn stop_modal_sound(
    commands: &mut Commands,
    sounds: &Query<(Entity, &ModalSound)>,
    which: ModalSound,
) {
    for (entity, sound) in sounds.iter() {
        if *sound == which {
            commands.entity(entity).despawn();
        }
    }
}

/// Resolve pending narration starts: a sink means it is playing, a failed
/// load means it was blocked and stays off.
pub fn confirm_narration_playback(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut registry: ResMut<ModalRegistry>,
    pending: Query<
        (Entity, &ModalSound, &AudioPlayer, Option<&AudioSink>),
        With<AwaitingPlayback>,
    >,
) {
    for (entity, sound, player, sink) in pending.iter() {
        let ModalSound::Narration(kind) = *sound else {
            continue;
        };
        if sink.is_some() {
            registry.narration_started(kind, true);
            commands.entity(entity).remove::<AwaitingPlayback>();
        } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&player.0) {
            warn!("Narration playback blocked: {}", err);
            registry.narration_started(kind, false);
            commands.entity(entity).despawn();
        }
    }
}

/// Swallow ringtone load failures: the call still works silently.
pub fn drop_failed_ringtones(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    ringtones: Query<(Entity, &ModalSound, &AudioPlayer), Without<AudioSink>>,
) {
    for (entity, sound, player) in ringtones.iter() {
        if *sound != ModalSound::Ringtone {
            continue;
        }
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&player.0) {
            warn!("Ringtone unavailable, continuing silently: {}", err);
            commands.entity(entity).despawn();
        }
    }
}
