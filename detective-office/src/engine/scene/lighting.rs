use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::palette::LAMP_LIGHT;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS_PER_UNIT, BOARD_SPOT_FACTOR, CABINET_SPOT_FACTOR, LAMP_RANGE,
    LUMENS_PER_UNIT, SIMPLIFIED_LIGHT_INTENSITY, SUN_LUX_PER_UNIT, WINDOW_LIGHT_RANGE,
};

use super::SceneRoot;
use crate::engine::environment::bands::srgba_hex;
use crate::engine::environment::snapshot::EnvironmentSnapshot;

#[derive(Component)]
pub struct SunLight;

/// Interior lights whose strength follows the time of day.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorLight {
    Window,
    DeskLamp,
    BoardSpot,
    CabinetSpot,
    Simplified,
}

impl InteriorLight {
    /// Unitless intensity and colour for this light at `snapshot`.
    pub fn level(self, snapshot: &EnvironmentSnapshot) -> (f32, Srgba) {
        let lamp = srgba_hex(LAMP_LIGHT);
        match self {
            Self::Window => (snapshot.window_light_intensity, snapshot.window_light_color),
            Self::DeskLamp => (snapshot.lamp_intensity, lamp),
            Self::BoardSpot => (snapshot.lamp_intensity * BOARD_SPOT_FACTOR, lamp),
            Self::CabinetSpot => (snapshot.lamp_intensity * CABINET_SPOT_FACTOR, lamp),
            Self::Simplified => (SIMPLIFIED_LIGHT_INTENSITY, Srgba::WHITE),
        }
    }
}

pub fn sun_transform(snapshot: &EnvironmentSnapshot) -> Transform {
    Transform::from_translation(snapshot.sun_position).looking_at(Vec3::ZERO, Vec3::Y)
}

pub fn fog_settings(snapshot: &EnvironmentSnapshot) -> DistanceFog {
    DistanceFog {
        color: Color::Srgba(snapshot.fog_color),
        falloff: FogFalloff::ExponentialSquared {
            density: snapshot.fog_density,
        },
        ..default()
    }
}

pub fn spawn_sun(commands: &mut Commands, snapshot: &EnvironmentSnapshot) {
    commands.spawn((
        DirectionalLight {
            color: Color::Srgba(snapshot.sun_color),
            illuminance: snapshot.sun_intensity * SUN_LUX_PER_UNIT,
            shadows_enabled: true,
            ..default()
        },
        sun_transform(snapshot),
        SunLight,
        SceneRoot,
    ));
}

pub fn point_light(kind: InteriorLight, snapshot: &EnvironmentSnapshot) -> PointLight {
    let (intensity, color) = kind.level(snapshot);
    let range = match kind {
        InteriorLight::Window => WINDOW_LIGHT_RANGE,
        _ => LAMP_RANGE,
    };
    PointLight {
        color: Color::Srgba(color),
        intensity: intensity * LUMENS_PER_UNIT,
        range,
        shadows_enabled: kind != InteriorLight::Window,
        ..default()
    }
}

pub fn spot_light(kind: InteriorLight, snapshot: &EnvironmentSnapshot, angle: f32) -> SpotLight {
    let (intensity, color) = kind.level(snapshot);
    SpotLight {
        color: Color::Srgba(color),
        intensity: intensity * LUMENS_PER_UNIT,
        range: LAMP_RANGE,
        outer_angle: angle,
        inner_angle: angle * 0.5,
        shadows_enabled: true,
        ..default()
    }
}

/// Push the snapshot into every light, the fog and the clear colour.
pub fn bind_environment_lighting(
    snapshot: Res<EnvironmentSnapshot>,
    mut ambient: ResMut<AmbientLight>,
    mut clear_color: ResMut<ClearColor>,
    mut fog: Query<&mut DistanceFog>,
    mut sun: Query<(&mut DirectionalLight, &mut Transform), With<SunLight>>,
    mut point_lights: Query<(&InteriorLight, &mut PointLight)>,
    mut spot_lights: Query<(&InteriorLight, &mut SpotLight)>,
) {
    if !snapshot.is_changed() {
        return;
    }

    ambient.color = Color::Srgba(snapshot.ambient_color);
    ambient.brightness = snapshot.ambient_intensity * AMBIENT_BRIGHTNESS_PER_UNIT;
    clear_color.0 = Color::Srgba(snapshot.background_color);

    for mut settings in fog.iter_mut() {
        *settings = fog_settings(&snapshot);
    }

    for (mut light, mut transform) in sun.iter_mut() {
        light.color = Color::Srgba(snapshot.sun_color);
        light.illuminance = snapshot.sun_intensity * SUN_LUX_PER_UNIT;
        *transform = sun_transform(&snapshot);
    }

    for (kind, mut light) in point_lights.iter_mut() {
        let (intensity, color) = kind.level(&snapshot);
        light.color = Color::Srgba(color);
        light.intensity = intensity * LUMENS_PER_UNIT;
    }

    for (kind, mut light) in spot_lights.iter_mut() {
        let (intensity, color) = kind.level(&snapshot);
        light.color = Color::Srgba(color);
        light.intensity = intensity * LUMENS_PER_UNIT;
    }
}
