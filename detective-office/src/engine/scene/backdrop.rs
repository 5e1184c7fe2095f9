use bevy::prelude::*;
use constants::render_settings::{
    CITY_BUILDING_COUNT, CITY_ORIGIN, CITY_WINDOW_EMISSIVE, CITY_WINDOWS_PER_BUILDING,
};
use rand::Rng;

use super::SceneRoot;
use crate::engine::environment::snapshot::{CityLights, EnvironmentSnapshot};

/// Building bodies and the skyline strip share one material.
#[derive(Component)]
pub struct CitySilhouette;

/// A lit window; `flicker` scales its glow so the skyline is uneven.
#[derive(Component, Debug, Clone, Copy)]
pub struct CityWindow {
    pub flicker: f32,
}

/// Emissive output of one city window.
pub fn window_emissive(city: &CityLights, flicker: f32) -> LinearRgba {
    LinearRgba::from(city.window_color) * (city.window_intensity * flicker * CITY_WINDOW_EMISSIVE)
}

/// Height of building `index`; a slow sine so the skyline undulates.
pub fn building_height(index: usize) -> f32 {
    6.0 + (index as f32 * 0.5).sin() * 4.0
}

pub fn spawn_city_backdrop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    snapshot: &EnvironmentSnapshot,
    rng: &mut impl Rng,
) {
    let city = snapshot.city;
    let silhouette = materials.add(StandardMaterial {
        base_color: Color::Srgba(city.silhouette),
        perceptual_roughness: 0.8,
        ..default()
    });
    let window_mesh = meshes.add(Cuboid::new(1.0, 0.8, 0.1));

    commands
        .spawn((
            Transform::from_translation(Vec3::from_array(CITY_ORIGIN)),
            Visibility::default(),
            SceneRoot,
            Name::new("City backdrop"),
        ))
        .with_children(|city_root| {
            city_root.spawn((
                Mesh3d(meshes.add(Cuboid::new(30.0, 6.0, 1.0))),
                MeshMaterial3d(silhouette.clone()),
                Transform::from_xyz(0.0, 3.0, 0.0),
                CitySilhouette,
            ));

            for i in 0..CITY_BUILDING_COUNT {
                let height = building_height(i);
                let x = -14.0 + i as f32 * 2.0;
                city_root.spawn((
                    Mesh3d(meshes.add(Cuboid::new(1.5, height, 0.5))),
                    MeshMaterial3d(silhouette.clone()),
                    Transform::from_xyz(x, height * 0.5, 0.0),
                    CitySilhouette,
                ));

                for j in 0..CITY_WINDOWS_PER_BUILDING {
                    let flicker = rng.gen_range(0.5..1.0);
                    let material = materials.add(StandardMaterial {
                        base_color: Color::Srgba(city.window_color),
                        emissive: window_emissive(&city, flicker),
                        perceptual_roughness: 0.5,
                        ..default()
                    });
                    city_root.spawn((
                        Mesh3d(window_mesh.clone()),
                        MeshMaterial3d(material),
                        Transform::from_xyz(x, 1.0 + j as f32 * 1.2, 0.3),
                        CityWindow { flicker },
                    ));
                }
            }
        });
}

pub fn bind_city_backdrop(
    snapshot: Res<EnvironmentSnapshot>,
    silhouettes: Query<&MeshMaterial3d<StandardMaterial>, With<CitySilhouette>>,
    windows: Query<(&CityWindow, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !snapshot.is_changed() {
        return;
    }
    let city = snapshot.city;

    // All silhouettes share one handle.
    if let Some(handle) = silhouettes.iter().next() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = Color::Srgba(city.silhouette);
        }
    }

    for (window, handle) in windows.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = Color::Srgba(city.window_color);
            material.emissive = window_emissive(&city, window.flicker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daytime_windows_are_dark() {
        let city = EnvironmentSnapshot::at(12.0).city;
        assert_eq!(window_emissive(&city, 1.0), LinearRgba::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn night_windows_glow_with_flicker() {
        let city = EnvironmentSnapshot::at(23.0).city;
        let bright = window_emissive(&city, 1.0);
        let dim = window_emissive(&city, 0.5);
        assert!(bright.red > dim.red);
        assert!(dim.red > 0.0);
    }

    #[test]
    fn skyline_heights_stay_positive() {
        assert!((0..CITY_BUILDING_COUNT).all(|i| building_height(i) > 1.0));
    }
}
