use std::time::Duration;

use constants::audio::{
    CITY_TRACK, CLOCK_TRACK, DAY_VOLUMES, FADE_DURATION_MS, FADE_STAGGER_MS, INITIAL_VOLUMES,
    MORNING_VOLUMES, MUSIC_TRACK, NIGHT_VOLUMES, PLAY_STAGGER_MS, RAIN_TRACK, TOGGLE_COOLDOWN_MS,
};
use serde::Serialize;

use crate::engine::environment::bands::SoundscapeBucket;
use crate::engine::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannel {
    Music,
    Rain,
    City,
    Clock,
}

impl AudioChannel {
    pub const ALL: [AudioChannel; 4] = [Self::Music, Self::Rain, Self::City, Self::Clock];

    pub fn index(self) -> usize {
        match self {
            Self::Music => 0,
            Self::Rain => 1,
            Self::City => 2,
            Self::Clock => 3,
        }
    }

    pub fn track(self) -> &'static str {
        match self {
            Self::Music => MUSIC_TRACK,
            Self::Rain => RAIN_TRACK,
            Self::City => CITY_TRACK,
            Self::Clock => CLOCK_TRACK,
        }
    }

    pub fn volume_in(self, bucket: SoundscapeBucket) -> f32 {
        let table = match bucket {
            SoundscapeBucket::Night => NIGHT_VOLUMES,
            SoundscapeBucket::Morning => MORNING_VOLUMES,
            SoundscapeBucket::Day => DAY_VOLUMES,
        };
        table[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    pub status: LoadStatus,
    pub playing: bool,
    pub volume: f32,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Unloaded,
            playing: false,
            volume: 0.0,
        }
    }
}

/// Instructions for the playback backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Load(AudioChannel),
    Play { channel: AudioChannel, volume: f32 },
    Pause(AudioChannel),
    Fade {
        channel: AudioChannel,
        from: f32,
        to: f32,
        duration: Duration,
    },
    SetVolume { channel: AudioChannel, volume: f32 },
    Stop(AudioChannel),
    Unload(AudioChannel),
    /// One-shot desk interaction sound.
    Cue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundState {
    Off,
    Enabling,
    On,
    Disabling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Enabling,
    Disabling,
    /// A previous toggle is still settling.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAudio {
    Play(AudioChannel),
    FadeOut(AudioChannel),
    Pause(AudioChannel),
    Release(AudioChannel),
    Unlock,
}

/// Ambient soundscape: four looped channels behind one exclusive toggle.
///
/// Pure state machine. It never touches an audio backend; it emits
/// [`AudioCommand`]s and is told about load results through
/// [`AudioController::load_settled`].
#[derive(Debug)]
pub struct AudioController {
    channels: [ChannelState; 4],
    state: SoundState,
    busy: bool,
    torn_down: bool,
    bucket: SoundscapeBucket,
    scheduler: Scheduler<PendingAudio>,
}

impl AudioController {
    pub fn new(hours: f32) -> Self {
        Self {
            channels: [ChannelState::default(); 4],
            state: SoundState::Off,
            busy: false,
            torn_down: false,
            bucket: SoundscapeBucket::at(hours),
            scheduler: Scheduler::default(),
        }
    }

    pub fn state(&self) -> SoundState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.state, SoundState::Enabling | SoundState::On)
    }

    pub fn channel(&self, channel: AudioChannel) -> ChannelState {
        self.channels[channel.index()]
    }

    pub fn bucket(&self) -> SoundscapeBucket {
        self.bucket
    }

    pub fn toggle(&mut self) -> (ToggleOutcome, Vec<AudioCommand>) {
        if self.busy || self.torn_down {
            return (ToggleOutcome::Ignored, Vec::new());
        }
        self.busy = true;

        match self.state {
            SoundState::Off => {
                self.state = SoundState::Enabling;
                let mut commands = Vec::new();
                for channel in AudioChannel::ALL {
                    let slot = &mut self.channels[channel.index()];
                    if matches!(slot.status, LoadStatus::Unloaded | LoadStatus::Failed) {
                        slot.status = LoadStatus::Loading;
                        slot.volume = INITIAL_VOLUMES[channel.index()];
                        commands.push(AudioCommand::Load(channel));
                    }
                }
                if !self.any_loading() {
                    self.begin_playback();
                }
                (ToggleOutcome::Enabling, commands)
            }
            _ => {
                self.state = SoundState::Disabling;
                for channel in self.loaded_channels() {
                    let offset =
                        Duration::from_millis(FADE_STAGGER_MS * channel.index() as u64);
                    self.scheduler
                        .schedule_in(offset, PendingAudio::FadeOut(channel));
                    self.scheduler.schedule_in(
                        offset + Duration::from_millis(FADE_DURATION_MS),
                        PendingAudio::Pause(channel),
                    );
                }
                self.scheduler.schedule_in(
                    Duration::from_millis(TOGGLE_COOLDOWN_MS),
                    PendingAudio::Unlock,
                );
                (ToggleOutcome::Disabling, Vec::new())
            }
        }
    }

    /// Report the outcome of a `Load`. A failed channel is skipped, never fatal.
    pub fn load_settled(&mut self, channel: AudioChannel, ok: bool) {
        let slot = &mut self.channels[channel.index()];
        if slot.status != LoadStatus::Loading {
            return;
        }
        slot.status = if ok {
            LoadStatus::Loaded
        } else {
            LoadStatus::Failed
        };

        if self.state == SoundState::Enabling && !self.any_loading() {
            self.begin_playback();
        }
    }

    /// Feed the current hour. Retargets volumes only when the bucket changes.
    pub fn set_hours(&mut self, hours: f32) -> Vec<AudioCommand> {
        let bucket = SoundscapeBucket::at(hours);
        if bucket == self.bucket {
            return Vec::new();
        }
        self.bucket = bucket;

        if !self.is_enabled() || self.torn_down {
            return Vec::new();
        }

        let mut commands = Vec::new();
        for channel in AudioChannel::ALL {
            let slot = &mut self.channels[channel.index()];
            if slot.status == LoadStatus::Loaded && slot.playing {
                slot.volume = channel.volume_in(bucket);
                commands.push(AudioCommand::SetVolume {
                    channel,
                    volume: slot.volume,
                });
            }
        }
        commands
    }

    pub fn cue(&self) -> Vec<AudioCommand> {
        if self.state == SoundState::On {
            vec![AudioCommand::Cue]
        } else {
            Vec::new()
        }
    }

    /// Fade out and release everything regardless of the toggle state.
    pub fn teardown(&mut self) -> Vec<AudioCommand> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;
        self.busy = true;
        self.state = SoundState::Off;
        self.scheduler.clear();

        let mut commands = Vec::new();
        for channel in self.loaded_channels() {
            let slot = &mut self.channels[channel.index()];
            commands.push(AudioCommand::Fade {
                channel,
                from: slot.volume,
                to: 0.0,
                duration: Duration::from_millis(FADE_DURATION_MS),
            });
            slot.volume = 0.0;
            self.scheduler.schedule_in(
                Duration::from_millis(FADE_DURATION_MS),
                PendingAudio::Release(channel),
            );
        }
        commands
    }

    pub fn advance(&mut self, delta: Duration) -> Vec<AudioCommand> {
        let mut commands = Vec::new();
        for pending in self.scheduler.advance(delta) {
            match pending {
                PendingAudio::Play(channel) => {
                    let volume = channel.volume_in(self.bucket);
                    let slot = &mut self.channels[channel.index()];
                    slot.playing = true;
                    slot.volume = volume;
                    commands.push(AudioCommand::Play { channel, volume });
                }
                PendingAudio::FadeOut(channel) => {
                    let slot = &mut self.channels[channel.index()];
                    commands.push(AudioCommand::Fade {
                        channel,
                        from: slot.volume,
                        to: 0.0,
                        duration: Duration::from_millis(FADE_DURATION_MS),
                    });
                    slot.volume = 0.0;
                }
                PendingAudio::Pause(channel) => {
                    self.channels[channel.index()].playing = false;
                    commands.push(AudioCommand::Pause(channel));
                }
                PendingAudio::Release(channel) => {
                    let slot = &mut self.channels[channel.index()];
                    slot.playing = false;
                    slot.status = LoadStatus::Unloaded;
                    commands.push(AudioCommand::Stop(channel));
                    commands.push(AudioCommand::Unload(channel));
                }
                PendingAudio::Unlock => {
                    self.busy = false;
                    self.state = match self.state {
                        SoundState::Enabling => SoundState::On,
                        SoundState::Disabling => SoundState::Off,
                        other => other,
                    };
                }
            }
        }
        commands
    }

    fn any_loading(&self) -> bool {
        self.channels
            .iter()
            .any(|slot| slot.status == LoadStatus::Loading)
    }

    fn loaded_channels(&self) -> Vec<AudioChannel> {
        AudioChannel::ALL
            .into_iter()
            .filter(|channel| self.channels[channel.index()].status == LoadStatus::Loaded)
            .collect()
    }

    /// Each channel keeps its own start slot even when an earlier one failed.
    fn begin_playback(&mut self) {
        for channel in self.loaded_channels() {
            self.scheduler.schedule_in(
                Duration::from_millis(PLAY_STAGGER_MS * channel.index() as u64),
                PendingAudio::Play(channel),
            );
        }
        self.scheduler.schedule_in(
            Duration::from_millis(TOGGLE_COOLDOWN_MS),
            PendingAudio::Unlock,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn enabled_at(hours: f32) -> AudioController {
        let mut audio = AudioController::new(hours);
        audio.toggle();
        for channel in AudioChannel::ALL {
            audio.load_settled(channel, true);
        }
        audio.advance(ms(1000));
        assert_eq!(audio.state(), SoundState::On);
        audio
    }

    #[test]
    fn enabling_loads_every_channel_first() {
        let mut audio = AudioController::new(22.0);
        let (outcome, commands) = audio.toggle();
        assert_eq!(outcome, ToggleOutcome::Enabling);
        assert_eq!(
            commands,
            AudioChannel::ALL.map(AudioCommand::Load).to_vec()
        );
        // Nothing plays until loads settle.
        assert!(audio.advance(ms(5000)).is_empty());
        assert_eq!(audio.state(), SoundState::Enabling);
    }

    #[test]
    fn second_toggle_inside_cooldown_is_ignored() {
        let mut audio = AudioController::new(22.0);
        audio.toggle();
        for channel in AudioChannel::ALL {
            audio.load_settled(channel, true);
        }
        audio.advance(ms(500));

        let (outcome, commands) = audio.toggle();
        assert_eq!(outcome, ToggleOutcome::Ignored);
        assert!(commands.is_empty());
        assert_eq!(audio.state(), SoundState::Enabling);
    }

    #[test]
    fn channels_start_staggered_with_bucket_volume() {
        let mut audio = AudioController::new(23.0);
        audio.toggle();
        for channel in AudioChannel::ALL {
            audio.load_settled(channel, true);
        }

        assert_eq!(
            audio.advance(ms(0)),
            vec![AudioCommand::Play {
                channel: AudioChannel::Music,
                volume: 0.3
            }]
        );
        assert!(audio.advance(ms(299)).is_empty());
        assert_eq!(
            audio.advance(ms(1)),
            vec![AudioCommand::Play {
                channel: AudioChannel::Rain,
                volume: 0.3
            }]
        );
        let rest = audio.advance(ms(600));
        assert_eq!(
            rest,
            vec![
                AudioCommand::Play {
                    channel: AudioChannel::City,
                    volume: 0.05
                },
                AudioCommand::Play {
                    channel: AudioChannel::Clock,
                    volume: 0.15
                },
            ]
        );
    }

    #[test]
    fn failed_load_does_not_block_the_rest() {
        let mut audio = AudioController::new(12.0);
        audio.toggle();
        audio.load_settled(AudioChannel::Music, false);
        audio.load_settled(AudioChannel::Rain, true);
        audio.load_settled(AudioChannel::City, true);
        audio.load_settled(AudioChannel::Clock, true);

        // Rain keeps its own 300 ms slot instead of taking the music's.
        assert!(audio.advance(ms(0)).is_empty());
        assert_eq!(
            audio.advance(ms(300)),
            vec![AudioCommand::Play {
                channel: AudioChannel::Rain,
                volume: 0.1
            }]
        );

        let played: Vec<_> = audio
            .advance(ms(700))
            .into_iter()
            .filter_map(|c| match c {
                AudioCommand::Play { channel, .. } => Some(channel),
                _ => None,
            })
            .collect();
        assert_eq!(played, vec![AudioChannel::City, AudioChannel::Clock]);
        assert_eq!(audio.state(), SoundState::On);
        assert_eq!(audio.channel(AudioChannel::Music).status, LoadStatus::Failed);
    }

    #[test]
    fn disabling_fades_then_pauses_without_unloading() {
        let mut audio = enabled_at(12.0);
        let (outcome, immediate) = audio.toggle();
        assert_eq!(outcome, ToggleOutcome::Disabling);
        assert!(immediate.is_empty());

        let first = audio.advance(ms(0));
        assert_eq!(
            first,
            vec![AudioCommand::Fade {
                channel: AudioChannel::Music,
                from: 0.15,
                to: 0.0,
                duration: ms(300),
            }]
        );

        let later = audio.advance(ms(1000));
        let pauses = later
            .iter()
            .filter(|c| matches!(c, AudioCommand::Pause(_)))
            .count();
        assert_eq!(pauses, 4);
        assert!(!later.iter().any(|c| matches!(c, AudioCommand::Unload(_))));
        assert_eq!(audio.state(), SoundState::Off);
        assert_eq!(audio.channel(AudioChannel::Rain).status, LoadStatus::Loaded);
    }

    #[test]
    fn re_enabling_skips_reload() {
        let mut audio = enabled_at(12.0);
        audio.toggle();
        audio.advance(ms(1000));
        let (_, commands) = audio.toggle();
        assert!(commands.is_empty());
        let plays = audio.advance(ms(1000));
        assert_eq!(plays.len(), 4);
    }

    #[test]
    fn volumes_retarget_only_on_bucket_change() {
        let mut audio = enabled_at(12.0);
        assert!(audio.set_hours(15.0).is_empty());

        let commands = audio.set_hours(19.0);
        assert_eq!(
            commands,
            vec![
                AudioCommand::SetVolume {
                    channel: AudioChannel::Music,
                    volume: 0.3
                },
                AudioCommand::SetVolume {
                    channel: AudioChannel::Rain,
                    volume: 0.3
                },
                AudioCommand::SetVolume {
                    channel: AudioChannel::City,
                    volume: 0.05
                },
                AudioCommand::SetVolume {
                    channel: AudioChannel::Clock,
                    volume: 0.15
                },
            ]
        );
    }

    #[test]
    fn bucket_change_while_off_is_silent() {
        let mut audio = AudioController::new(12.0);
        assert!(audio.set_hours(23.0).is_empty());
        assert_eq!(audio.bucket(), SoundscapeBucket::Night);
    }

    #[test]
    fn teardown_fades_then_releases() {
        let mut audio = enabled_at(8.0);
        let fades = audio.teardown();
        assert_eq!(fades.len(), 4);
        assert!(fades.iter().all(|c| matches!(c, AudioCommand::Fade { to, .. } if *to == 0.0)));

        let release = audio.advance(ms(300));
        assert_eq!(
            release
                .iter()
                .filter(|c| matches!(c, AudioCommand::Stop(_)))
                .count(),
            4
        );
        assert_eq!(
            release
                .iter()
                .filter(|c| matches!(c, AudioCommand::Unload(_)))
                .count(),
            4
        );
        assert_eq!(audio.toggle().0, ToggleOutcome::Ignored);
        assert!(audio.teardown().is_empty());
    }

    #[test]
    fn teardown_cancels_pending_starts() {
        let mut audio = AudioController::new(22.0);
        audio.toggle();
        for channel in AudioChannel::ALL {
            audio.load_settled(channel, true);
        }
        audio.advance(ms(0));
        audio.teardown();
        let after = audio.advance(ms(2000));
        assert!(!after.iter().any(|c| matches!(c, AudioCommand::Play { .. })));
    }

    #[test]
    fn cue_only_when_sound_is_on() {
        let audio = AudioController::new(12.0);
        assert!(audio.cue().is_empty());
        let audio = enabled_at(12.0);
        assert_eq!(audio.cue(), vec![AudioCommand::Cue]);
    }
}
