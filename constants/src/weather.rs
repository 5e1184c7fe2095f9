pub const RAIN_DROP_COUNT: usize = 1000;
pub const RAIN_DROP_SIZE: f32 = 0.1;
/// World units per second at intensity 1.0.
pub const RAIN_FALL_SPEED: f32 = 10.0;
/// Opacity = intensity * this.
pub const RAIN_OPACITY_SCALE: f32 = 0.3;

pub const RAIN_TOP: f32 = 15.0;
pub const RAIN_BOTTOM: f32 = -5.0;
/// Drops are kept on the street side of the back wall.
pub const RAIN_MAX_Z: f32 = -4.8;
pub const RAIN_DEPTH_SPREAD: f32 = 10.0;

/// Share of drops respawned in the window span rather than the wide field.
pub const RAIN_WINDOW_SHARE: f32 = 0.7;
pub const RAIN_WINDOW_HALF_WIDTH: f32 = 2.0;
pub const RAIN_WIDE_HALF_WIDTH: f32 = 7.5;

pub const RAIN_INTENSITY_NIGHT: f32 = 1.0;
pub const RAIN_INTENSITY_MORNING: f32 = 0.7;
pub const RAIN_INTENSITY_EVENING: f32 = 0.5;
pub const RAIN_INTENSITY_DAY: f32 = 0.3;
