use bevy::picking::Pickable;
use bevy::prelude::*;
use constants::weather::{
    RAIN_BOTTOM, RAIN_DEPTH_SPREAD, RAIN_DROP_COUNT, RAIN_DROP_SIZE, RAIN_FALL_SPEED,
    RAIN_MAX_Z, RAIN_TOP, RAIN_WIDE_HALF_WIDTH, RAIN_WINDOW_HALF_WIDTH, RAIN_WINDOW_SHARE,
};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::SceneRoot;
use crate::engine::environment::snapshot::EnvironmentSnapshot;

/// Drop positions outside the back wall.
#[derive(Resource, Debug, Clone)]
pub struct RainField {
    drops: Vec<Vec3>,
    rng: StdRng,
}

impl RainField {
    pub fn new(count: usize, mut rng: StdRng) -> Self {
        let drops = (0..count)
            .map(|_| {
                Vec3::new(
                    spawn_x(&mut rng),
                    rng.gen_range(RAIN_BOTTOM..RAIN_TOP),
                    RAIN_MAX_Z - rng.gen_range(0.0..RAIN_DEPTH_SPREAD),
                )
            })
            .collect();
        Self { drops, rng }
    }

    pub fn drops(&self) -> &[Vec3] {
        &self.drops
    }

    /// Fall at `intensity`-scaled speed; drops past the bottom respawn at the top.
    pub fn step(&mut self, delta_secs: f32, intensity: f32) {
        let fall = delta_secs * RAIN_FALL_SPEED * intensity;
        for drop in self.drops.iter_mut() {
            drop.y -= fall;
            if drop.y < RAIN_BOTTOM {
                drop.y = RAIN_TOP;
                drop.z = drop.z.min(RAIN_MAX_Z);
                drop.x = spawn_x(&mut self.rng);
            }
        }
    }
}

impl Default for RainField {
    fn default() -> Self {
        Self::new(RAIN_DROP_COUNT, StdRng::from_entropy())
    }
}

fn spawn_x(rng: &mut impl Rng) -> f32 {
    if rng.gen_bool(f64::from(RAIN_WINDOW_SHARE)) {
        rng.gen_range(-RAIN_WINDOW_HALF_WIDTH..RAIN_WINDOW_HALF_WIDTH)
    } else {
        rng.gen_range(-RAIN_WIDE_HALF_WIDTH..RAIN_WIDE_HALF_WIDTH)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct RainDrop(pub usize);

/// Shared material of every drop, retinted with the snapshot.
#[derive(Resource, Debug, Clone)]
pub struct RainMaterial(pub Handle<StandardMaterial>);

pub fn spawn_rain(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    field: &RainField,
) {
    let mesh = meshes.add(Cuboid::new(0.01, RAIN_DROP_SIZE, 0.01));
    let material = materials.add(StandardMaterial {
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    commands.insert_resource(RainMaterial(material.clone()));

    for (index, position) in field.drops().iter().enumerate() {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(*position),
            Pickable::IGNORE,
            RainDrop(index),
            SceneRoot,
        ));
    }
}

pub fn animate_rain(
    time: Res<Time>,
    snapshot: Res<EnvironmentSnapshot>,
    mut field: ResMut<RainField>,
    mut drops: Query<(&RainDrop, &mut Transform)>,
) {
    field.step(time.delta_secs(), snapshot.rain_intensity);
    for (drop, mut transform) in drops.iter_mut() {
        if let Some(position) = field.drops().get(drop.0) {
            transform.translation = *position;
        }
    }
}

pub fn tint_rain(
    snapshot: Res<EnvironmentSnapshot>,
    rain_material: Option<Res<RainMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(rain_material) = rain_material else {
        return;
    };
    if !snapshot.is_changed() && !rain_material.is_added() {
        return;
    }
    if let Some(material) = materials.get_mut(&rain_material.0) {
        material.base_color = Color::Srgba(snapshot.rain_color.with_alpha(snapshot.rain_opacity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> RainField {
        RainField::new(RAIN_DROP_COUNT, StdRng::seed_from_u64(7))
    }

    #[test]
    fn drops_start_outside_the_office() {
        let field = field();
        assert_eq!(field.drops().len(), 1000);
        for drop in field.drops() {
            assert!(drop.z <= RAIN_MAX_Z);
            assert!(drop.z >= RAIN_MAX_Z - RAIN_DEPTH_SPREAD);
            assert!((RAIN_BOTTOM..RAIN_TOP).contains(&drop.y));
            assert!(drop.x.abs() <= RAIN_WIDE_HALF_WIDTH);
        }
    }

    #[test]
    fn fall_speed_scales_with_intensity() {
        let mut field = RainField {
            drops: vec![Vec3::new(0.0, 10.0, -6.0)],
            rng: StdRng::seed_from_u64(1),
        };
        field.step(0.1, 0.5);
        assert!((field.drops()[0].y - 9.5).abs() < 1e-5);
    }

    #[test]
    fn fallen_drops_respawn_at_the_top() {
        let mut field = RainField {
            drops: vec![Vec3::new(0.0, -4.95, -4.0)],
            rng: StdRng::seed_from_u64(1),
        };
        field.step(0.1, 1.0);
        let drop = field.drops()[0];
        assert_eq!(drop.y, RAIN_TOP);
        assert_eq!(drop.z, RAIN_MAX_Z);
        assert!(drop.x.abs() <= RAIN_WIDE_HALF_WIDTH);
    }

    #[test]
    fn drops_stay_outside_over_time() {
        let mut field = field();
        for _ in 0..200 {
            field.step(0.05, 1.0);
        }
        assert!(field.drops().iter().all(|d| d.z <= RAIN_MAX_Z));
        assert!(field.drops().iter().all(|d| d.y >= RAIN_BOTTOM && d.y <= RAIN_TOP));
    }
}
