/// Length of one cycle in hours.
pub const HOURS_PER_DAY: f32 = 24.0;

/// Session start: late evening, rain at full strength.
pub const INITIAL_TIME_OF_DAY: f32 = 22.0;
pub const INITIAL_CYCLE_SPEED: f32 = 0.0;

/// Slider ranges exposed to the host page.
pub const TIME_SLIDER_STEP: f32 = 0.1;
pub const MAX_CYCLE_SPEED: f32 = 1.0;
pub const CYCLE_SPEED_STEP: f32 = 0.1;

/// Auto-advance only evaluates on every Nth frame.
pub const AUTO_ADVANCE_FRAME_INTERVAL: u32 = 10;
/// Minimum accumulated seconds before an auto-advance step is considered.
pub const AUTO_ADVANCE_MIN_ELAPSED_SECS: f32 = 0.5;
/// Hours advanced per second at cycle speed 1.0.
pub const AUTO_ADVANCE_HOURS_PER_SEC: f32 = 5.0;
/// Changes at or below this many hours are not published.
pub const AUTO_ADVANCE_MIN_CHANGE: f32 = 0.1;

pub const PRESET_MORNING: f32 = 7.0;
pub const PRESET_DAY: f32 = 13.0;
pub const PRESET_EVENING: f32 = 19.0;
pub const PRESET_NIGHT: f32 = 23.0;

// Lighting band edges (hours). Night wraps from DUSK_END through DAWN_START.
pub const DAWN_START: f32 = 4.0;
pub const MORNING_START: f32 = 5.0;
pub const DAY_START: f32 = 10.0;
pub const EVENING_START: f32 = 17.0;
pub const DUSK_START: f32 = 21.0;
pub const DUSK_END: f32 = 22.0;

/// Display phase edges for the HUD label (no transition bands).
pub const LABEL_MORNING_START: f32 = 5.0;
pub const LABEL_DAY_START: f32 = 10.0;
pub const LABEL_EVENING_START: f32 = 17.0;
pub const LABEL_NIGHT_START: f32 = 21.0;

/// Sun orbit geometry.
pub const SUN_ORBIT_RADIUS: f32 = 20.0;
pub const SUN_MIN_HEIGHT: f32 = -5.0;
pub const SUN_DEPTH: f32 = -10.0;
/// Hour at which the sun crosses the eastern horizon.
pub const SUN_RISE_HOUR: f32 = 6.0;

pub const SUN_INTENSITY_NIGHT: f32 = 0.3;
pub const SUN_INTENSITY_MORNING_START: f32 = 0.5;
pub const SUN_INTENSITY_DAY: f32 = 2.0;
pub const SUN_INTENSITY_EVENING_END: f32 = 0.5;

pub const FOG_DENSITY_NIGHT: f32 = 0.04;
pub const FOG_DENSITY_MORNING_START: f32 = 0.03;
pub const FOG_DENSITY_DAY: f32 = 0.01;

pub const BACKGROUND_FACTOR_NIGHT: f32 = 0.3;
pub const BACKGROUND_FACTOR_EVENING_END: f32 = 0.7;

pub const AMBIENT_INTENSITY_NIGHT: f32 = 0.5;
pub const AMBIENT_INTENSITY_DAY: f32 = 0.7;
