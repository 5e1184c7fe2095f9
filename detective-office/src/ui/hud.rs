use bevy::prelude::*;

use crate::engine::audio::controller::SoundState;
use crate::engine::audio::playback::SoundscapeDirector;
use crate::engine::environment::clock::{DayPhase, EnvironmentClock, format_clock, is_sun_visible};
use crate::engine::scene::RoomDetail;

/// Native readout standing in for the host page's control panel.
#[derive(Component)]
pub struct EnvironmentReadout;

pub fn readout_text(clock: &EnvironmentClock, sound: SoundState, detail: RoomDetail) -> String {
    let hours = clock.time_of_day();
    let icon = if is_sun_visible(hours) { "sun" } else { "moon" };
    let speed = if clock.is_auto_advancing() {
        format!("x{:.1}", clock.cycle_speed())
    } else {
        "paused".to_string()
    };
    format!(
        "{} {} ({})  cycle {}\nsound {:?}  room {:?}\n[ ] time  1-4 presets  C speed  M sound  R camera  T detail",
        format_clock(hours),
        DayPhase::at(hours).label(),
        icon,
        speed,
        sound,
        detail,
    )
}

pub fn spawn_environment_readout(commands: &mut Commands) {
    commands.spawn((
        EnvironmentReadout,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.85, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

pub fn update_environment_readout(
    clock: Res<EnvironmentClock>,
    director: Res<SoundscapeDirector>,
    detail: Res<RoomDetail>,
    mut query: Query<&mut Text, With<EnvironmentReadout>>,
) {
    let text = readout_text(&clock, director.controller.state(), *detail);
    for mut readout in &mut query {
        if readout.0 != text {
            readout.0 = text.clone();
        }
    }
}
