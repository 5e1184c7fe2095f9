use bevy::math::Vec3;

pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.5, 4.0);
pub const DEFAULT_CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 8.0;
/// Camera never dips below the horizontal plane through its target.
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.5;

/// Interpolation rate applied as `rate * dt` each frame.
pub const CAMERA_SMOOTHING: f32 = 12.0;

pub const DESK_FOCUS_POSITION: Vec3 = Vec3::new(0.0, 1.2, -2.0);
pub const DESK_FOCUS_LOOK_AT: Vec3 = Vec3::new(0.0, 0.5, -3.0);
pub const BOARD_FOCUS_POSITION: Vec3 = Vec3::new(-4.8, 2.0, -2.0);
pub const BOARD_FOCUS_LOOK_AT: Vec3 = Vec3::new(-4.8, 2.0, 0.0);
pub const CABINET_FOCUS_POSITION: Vec3 = Vec3::new(3.0, 1.0, -4.0);
pub const CABINET_FOCUS_LOOK_AT: Vec3 = Vec3::new(3.0, 1.0, -3.0);
