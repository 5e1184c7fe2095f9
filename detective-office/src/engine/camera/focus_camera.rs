use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    CAMERA_SMOOTHING, DEFAULT_CAMERA_LOOK_AT, DEFAULT_CAMERA_POSITION, ORBIT_MAX_DISTANCE,
    ORBIT_MAX_POLAR, ORBIT_MIN_DISTANCE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

use crate::ui::modals::registry::ModalRegistry;

/// Keeps the camera strictly above the pole so `looking_at` stays defined.
const MIN_POLAR: f32 = 0.01;

/// Camera target: a position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFocus {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraFocus {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

/// Spherical rig around a look-at point. The camera entity chases it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub look_at: Vec3,
    pub distance: f32,
    /// Angle from +Y.
    pub polar: f32,
    /// Angle around +Y, zero facing +Z.
    pub azimuth: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_focus(CameraFocus::new(
            DEFAULT_CAMERA_POSITION,
            DEFAULT_CAMERA_LOOK_AT,
        ))
    }
}

impl CameraRig {
    pub fn from_focus(focus: CameraFocus) -> Self {
        let offset = focus.position - focus.look_at;
        let distance = offset.length().max(f32::EPSILON);
        Self {
            look_at: focus.look_at,
            distance,
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.look_at
            + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// Jump the target to an explicit focus. Focus distances are not clamped.
    pub fn focus(&mut self, focus: CameraFocus) {
        *self = Self::from_focus(focus);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drag rotation in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * ORBIT_ROTATE_SPEED;
        self.polar = (self.polar - delta.y * ORBIT_ROTATE_SPEED).clamp(MIN_POLAR, ORBIT_MAX_POLAR);
    }

    /// Positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance =
            (self.distance - steps * ORBIT_ZOOM_SPEED).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn target_transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.look_at, Vec3::Y)
    }
}

#[derive(Component)]
pub struct OfficeCamera;

/// Right-drag orbits, wheel zooms. Ignored while a modal covers the scene.
pub fn orbit_camera_input(
    mut rig: ResMut<CameraRig>,
    registry: Res<ModalRegistry>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();

    if !registry.tracked_kinds().is_empty() {
        return;
    }

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        rig.orbit(mouse_delta);
    }
    if scroll.abs() > f32::EPSILON {
        rig.zoom(scroll);
    }
}

pub fn follow_camera_rig(
    time: Res<Time>,
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, With<OfficeCamera>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let target = rig.target_transform();
    let lerp_speed = (CAMERA_SMOOTHING * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::camera::DESK_FOCUS_POSITION;

    #[test]
    fn rig_round_trips_its_focus() {
        let rig = CameraRig::default();
        assert!(rig.position().distance(DEFAULT_CAMERA_POSITION) < 1e-4);
        assert_eq!(rig.look_at, DEFAULT_CAMERA_LOOK_AT);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut rig = CameraRig::default();
        rig.zoom(100.0);
        assert_eq!(rig.distance, ORBIT_MIN_DISTANCE);
        rig.zoom(-100.0);
        assert_eq!(rig.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn orbit_never_goes_below_the_horizon() {
        let mut rig = CameraRig::default();
        rig.orbit(Vec2::new(0.0, -10_000.0));
        assert!(rig.polar <= ORBIT_MAX_POLAR);
        assert!(rig.position().y >= rig.look_at.y - 1e-4);
        rig.orbit(Vec2::new(0.0, 10_000.0));
        assert_eq!(rig.polar, MIN_POLAR);
    }

    #[test]
    fn focus_then_reset() {
        let mut rig = CameraRig::default();
        rig.focus(CameraFocus::new(
            DESK_FOCUS_POSITION,
            Vec3::new(0.0, 0.5, -3.0),
        ));
        assert!(rig.position().distance(DESK_FOCUS_POSITION) < 1e-4);
        rig.reset();
        assert_eq!(rig, CameraRig::default());
    }

    #[test]
    fn camera_converges_on_the_rig() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<CameraRig>()
            .add_systems(Update, follow_camera_rig);
        let camera = app
            .world_mut()
            .spawn((OfficeCamera, Transform::from_xyz(10.0, 10.0, 10.0)))
            .id();
        for _ in 0..30 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(std::time::Duration::from_millis(100));
            app.update();
        }
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.distance(DEFAULT_CAMERA_POSITION) < 1e-3);
    }
}
