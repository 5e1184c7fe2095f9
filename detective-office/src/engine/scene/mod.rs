//! Scene composition for the office.
//!
//! Spawns the room (full or simplified), the city backdrop, the rain field
//! and the lights, then binds their visual properties to the current
//! [`EnvironmentSnapshot`](crate::engine::environment::snapshot::EnvironmentSnapshot)
//! every frame.

use bevy::prelude::*;
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use crate::content::case_files::CaseFileTable;
use crate::engine::core::app_state::AppState;
use crate::engine::environment::snapshot::EnvironmentSnapshot;
use crate::engine::loading::texture_cache::TextureCache;
use crate::interaction::hover::{HoveredObject, spawn_hover_labels};

/// City skyline behind the window.
pub mod backdrop;

/// Sun, interior lights, fog and clear colour bound to the snapshot.
pub mod lighting;

/// Per-surface materials with palette tinting and texture swap-in.
pub mod materials;

/// Rain particles falling outside the window.
pub mod rain;

/// Room geometry, furniture and interactive props.
pub mod room;

use backdrop::{bind_city_backdrop, spawn_city_backdrop};
use lighting::{bind_environment_lighting, spawn_sun};
use materials::{RoomMaterials, apply_room_palette, swap_in_textures};
use rain::{RainField, animate_rain, spawn_rain, tint_rain};
use room::{RoomKit, animate_room, spawn_full_room, spawn_simplified_room};

/// Top-level entity owned by the composed scene; despawned on rebuild.
#[derive(Component)]
pub struct SceneRoot;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomDetail {
    #[default]
    Full,
    Simplified,
}

impl RoomDetail {
    pub fn toggled(self) -> Self {
        match self {
            Self::Full => Self::Simplified,
            Self::Simplified => Self::Full,
        }
    }
}

/// Detail level the scene was last composed with.
#[derive(Resource, Debug, Default)]
pub struct ComposedScene(pub Option<RoomDetail>);

pub fn needs_composition(detail: RoomDetail, composed: &ComposedScene) -> bool {
    composed.0 != Some(detail)
}

/// Build the scene, or rebuild it when the room detail changed.
pub fn compose_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut composed: ResMut<ComposedScene>,
    mut hovered: ResMut<HoveredObject>,
    detail: Res<RoomDetail>,
    textures: Res<TextureCache>,
    snapshot: Res<EnvironmentSnapshot>,
    content: Option<Res<CaseFileTable>>,
    existing: Query<Entity, With<SceneRoot>>,
) {
    if !needs_composition(*detail, &composed) {
        return;
    }
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    hovered.0 = None;

    let mut rng = thread_rng();
    let surfaces = RoomMaterials::build(&mut materials, &textures, &snapshot.room_palette);
    let mut kit = RoomKit {
        meshes: &mut meshes,
        materials: &mut materials,
        surfaces: &surfaces,
        snapshot: &snapshot,
    };

    match *detail {
        RoomDetail::Full => {
            let labels = spawn_full_room(&mut commands, &mut kit, content.as_deref(), &mut rng);
            spawn_hover_labels(&mut commands, labels);
        }
        RoomDetail::Simplified => spawn_simplified_room(&mut commands, &mut kit),
    }

    spawn_sun(&mut commands, &snapshot);
    spawn_city_backdrop(&mut commands, &mut meshes, &mut materials, &snapshot, &mut rng);
    let field = RainField::default();
    spawn_rain(&mut commands, &mut meshes, &mut materials, &field);
    commands.insert_resource(field);
    commands.insert_resource(surfaces);

    composed.0 = Some(*detail);
    println!("✓ Scene composed ({:?} room)", *detail);
}

/// Drop the scene when leaving the running state.
pub fn clear_scene(
    mut commands: Commands,
    mut composed: ResMut<ComposedScene>,
    existing: Query<Entity, With<SceneRoot>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    composed.0 = None;
}

pub struct OfficeScenePlugin;

impl Plugin for OfficeScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoomDetail>()
            .init_resource::<ComposedScene>()
            .add_systems(OnExit(AppState::Running), clear_scene)
            .add_systems(
                Update,
                (
                    compose_scene,
                    (
                        bind_environment_lighting,
                        bind_city_backdrop,
                        apply_room_palette,
                        swap_in_textures,
                        tint_rain,
                        animate_rain,
                        animate_room,
                    ),
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}
