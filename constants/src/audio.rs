pub const MUSIC_TRACK: &str = "sounds/noir-jazz.mp3";
pub const RAIN_TRACK: &str = "sounds/rain-ambience.mp3";
pub const CITY_TRACK: &str = "sounds/city-ambience.mp3";
pub const CLOCK_TRACK: &str = "sounds/ticking-clock.mp3";

/// Volumes assigned at load, in channel order music, rain, city, clock.
pub const INITIAL_VOLUMES: [f32; 4] = [0.3, 0.2, 0.1, 0.15];

pub const NIGHT_VOLUMES: [f32; 4] = [0.3, 0.3, 0.05, 0.15];
pub const MORNING_VOLUMES: [f32; 4] = [0.2, 0.2, 0.1, 0.12];
pub const DAY_VOLUMES: [f32; 4] = [0.15, 0.1, 0.15, 0.1];

/// Delay between consecutive channel starts when enabling.
pub const PLAY_STAGGER_MS: u64 = 300;
/// Delay between consecutive channel fade-outs when disabling.
pub const FADE_STAGGER_MS: u64 = 100;
pub const FADE_DURATION_MS: u64 = 300;
/// Toggle stays locked this long after the last state change settles.
pub const TOGGLE_COOLDOWN_MS: u64 = 1000;

pub const NARRATION_TRACK: &str = "sounds/typewriter.mp3";
pub const NARRATION_VOLUME: f32 = 0.2;
pub const RINGTONE_TRACK: &str = "sounds/click.mp3";
pub const RINGTONE_VOLUME: f32 = 0.3;
pub const DESK_CUE_TRACK: &str = "sounds/click.mp3";
pub const DESK_CUE_VOLUME: f32 = 0.5;
