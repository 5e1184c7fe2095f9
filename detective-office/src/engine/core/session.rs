use bevy::prelude::*;
use constants::time_of_day::{INITIAL_CYCLE_SPEED, INITIAL_TIME_OF_DAY};
use serde::Serialize;

use crate::engine::audio::playback::SoundscapeDirector;
use crate::engine::environment::clock::EnvironmentClock;
use crate::engine::environment::snapshot::EnvironmentSnapshot;
use crate::engine::scene::RoomDetail;

/// Per-session settings. The host page may change them over RPC.
#[derive(Resource, Debug, Clone, Serialize)]
pub struct SessionConfig {
    pub initial_time_of_day: f32,
    pub initial_cycle_speed: f32,
    pub room_detail: RoomDetail,
    /// Play the one-shot cue when the desk is examined.
    pub desk_cue: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_time_of_day: INITIAL_TIME_OF_DAY,
            initial_cycle_speed: INITIAL_CYCLE_SPEED,
            room_detail: RoomDetail::Full,
            desk_cue: true,
        }
    }
}

impl SessionConfig {
    pub fn clock(&self) -> EnvironmentClock {
        EnvironmentClock::new(self.initial_time_of_day, self.initial_cycle_speed)
    }
}

/// Seed the clock, the resources derived from it and the room detail.
pub fn apply_session_config(mut commands: Commands, session: Res<SessionConfig>) {
    let clock = session.clock();
    let hours = clock.time_of_day();
    commands.insert_resource(clock);
    commands.insert_resource(EnvironmentSnapshot::at(hours));
    commands.insert_resource(SoundscapeDirector::new(hours));
    commands.insert_resource(session.room_detail);
    println!(
        "✓ Session configured: {:.1}h, speed {:.1}, {:?} room",
        session.initial_time_of_day, session.initial_cycle_speed, session.room_detail
    );
}
