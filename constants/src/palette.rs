// Sun and sky
pub const SUN_MORNING: u32 = 0xffcc88;
pub const SUN_DAY: u32 = 0xffffff;
pub const SUN_EVENING: u32 = 0xff9966;
pub const SUN_NIGHT: u32 = 0x8888ff;

pub const FOG_MORNING: u32 = 0x8ba3c7;
pub const FOG_DAY: u32 = 0xc8d8e8;
pub const FOG_NIGHT: u32 = 0x0a0a1f;
/// Evening fog is authored as linear ramps per channel: `start + slope * t`.
pub const FOG_EVENING_START: [f32; 3] = [0.78, 0.5, 0.6];
pub const FOG_EVENING_SLOPE: [f32; 3] = [-0.5, -0.4, 0.2];

pub const AMBIENT_NIGHT: u32 = 0x0a0a2f;
pub const AMBIENT_DAY: u32 = 0xe0e8ff;

// Interior lights
pub const WINDOW_LIGHT_NIGHT: u32 = 0x2a2a4a;
pub const WINDOW_LIGHT_DAY: u32 = 0xe0e8ff;
pub const LAMP_LIGHT: u32 = 0xffffcc;
pub const WINDOW_GLASS: u32 = 0x1a1a2e;
pub const WINDOW_GLASS_OPACITY: f32 = 0.7;

// City backdrop: (window colour, window intensity, silhouette colour)
pub const CITY_NIGHT: (u32, f32, u32) = (0xffcc77, 0.8, 0x0a0a1f);
pub const CITY_EVENING: (u32, f32, u32) = (0xffeecc, 0.5, 0x4a3b55);
pub const CITY_MORNING: (u32, f32, u32) = (0xffffff, 0.3, 0x5d6b85);
pub const CITY_DAY: (u32, f32, u32) = (0xffffff, 0.0, 0x667788);

/// Room surface colours in order: floor, walls, desk, chair, bulletin, cabinet.
pub const ROOM_NIGHT: [u32; 6] = [0x3d2c27, 0x1c1c24, 0x5b3513, 0x3d2c27, 0x752a2a, 0x494949];
pub const ROOM_WARM: [u32; 6] = [0x4d3c37, 0x2c2c34, 0x7b4513, 0x4d3c37, 0x852a2a, 0x595959];
pub const ROOM_DAY: [u32; 6] = [0x5d4c47, 0x3c3c44, 0x8b5513, 0x5d4c47, 0x952a2a, 0x696969];

// Rain tint
pub const RAIN_NIGHT: u32 = 0x8888ff;
pub const RAIN_EVENING: u32 = 0xaabbcc;
pub const RAIN_DAY: u32 = 0xcccccc;

// Overlay UI
pub const HOVER_LABEL_ACTIVE: u32 = 0xffcc66;
pub const HOVER_LABEL_IDLE: u32 = 0xffffff;
pub const MODAL_BACKDROP_ALPHA: f32 = 0.75;
pub const MODAL_CARD: u32 = 0x1f1a17;
pub const MODAL_ACCENT: u32 = 0xffcc66;
