//! Scale factors from the unitless environment values to Bevy light units.

/// Directional light lux per unit of sun intensity.
pub const SUN_LUX_PER_UNIT: f32 = 4_000.0;
/// Ambient brightness (cd/m^2) per unit of ambient intensity.
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 250.0;
/// Point and spot light lumens per unit of intensity.
pub const LUMENS_PER_UNIT: f32 = 60_000.0;
/// Emissive multiplier applied to lit city windows.
pub const CITY_WINDOW_EMISSIVE: f32 = 6.0;

pub const WINDOW_LIGHT_RANGE: f32 = 5.0;
pub const LAMP_RANGE: f32 = 6.0;
pub const BOARD_SPOT_FACTOR: f32 = 0.6;
pub const CABINET_SPOT_FACTOR: f32 = 0.5;
pub const SIMPLIFIED_LIGHT_INTENSITY: f32 = 1.0;

/// Ambient sway of the detailed room (radians, rate in rad/s of the sine argument).
pub const ROOM_SWAY_AMPLITUDE: f32 = 0.02;
pub const ROOM_SWAY_RATE: f32 = 0.05;
pub const CHAIR_SWAY_AMPLITUDE: f32 = 0.05;
pub const CHAIR_SWAY_RATE: f32 = 0.1;
pub const SIMPLIFIED_SPIN_RATE: f32 = 0.1;

/// City backdrop layout.
pub const CITY_BUILDING_COUNT: usize = 15;
pub const CITY_WINDOWS_PER_BUILDING: usize = 5;
pub const CITY_ORIGIN: [f32; 3] = [0.0, 1.0, -15.0];

/// Seconds between `fps_update` notifications.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
/// How long the app waits for a render device before declaring a fault.
pub const RENDERER_WATCHDOG_SECS: f32 = 10.0;
