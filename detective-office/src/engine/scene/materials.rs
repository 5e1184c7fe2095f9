use std::collections::HashMap;

use bevy::prelude::*;

use crate::engine::environment::snapshot::{EnvironmentSnapshot, RoomPalette};
use crate::engine::loading::texture_cache::{TextureCache, TextureSwapped};

/// Surfaces whose material follows a texture and, for most, the room palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRole {
    Floor,
    Walls,
    Desk,
    Chair,
    Bulletin,
    Cabinet,
    Paper,
    Metal,
}

impl SurfaceRole {
    pub const ALL: [SurfaceRole; 8] = [
        Self::Floor,
        Self::Walls,
        Self::Desk,
        Self::Chair,
        Self::Bulletin,
        Self::Cabinet,
        Self::Paper,
        Self::Metal,
    ];

    pub fn texture_name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Walls => "wallpaper",
            Self::Desk => "wood",
            Self::Chair => "leather",
            Self::Bulletin => "cork",
            Self::Cabinet | Self::Metal => "metal",
            Self::Paper => "paper",
        }
    }

    /// Palette tint, or `None` for surfaces that keep their texture colour.
    pub fn tint(self, palette: &RoomPalette) -> Option<Srgba> {
        match self {
            Self::Floor => Some(palette.floor),
            Self::Walls => Some(palette.walls),
            Self::Desk => Some(palette.desk),
            Self::Chair => Some(palette.chair),
            Self::Bulletin => Some(palette.bulletin),
            Self::Cabinet => Some(palette.cabinet),
            Self::Paper | Self::Metal => None,
        }
    }

    fn roughness_metallic(self) -> (f32, f32) {
        match self {
            Self::Floor => (0.8, 0.2),
            Self::Walls => (0.7, 0.0),
            Self::Desk => (0.6, 0.1),
            Self::Chair => (0.6, 0.0),
            Self::Bulletin => (0.7, 0.0),
            Self::Cabinet => (0.3, 0.7),
            Self::Paper => (0.9, 0.0),
            Self::Metal => (0.2, 0.8),
        }
    }
}

/// One shared material per surface role.
#[derive(Resource, Debug, Default, Clone)]
pub struct RoomMaterials {
    surfaces: HashMap<SurfaceRole, Handle<StandardMaterial>>,
}

impl RoomMaterials {
    pub fn build(
        materials: &mut Assets<StandardMaterial>,
        textures: &TextureCache,
        palette: &RoomPalette,
    ) -> Self {
        let surfaces = SurfaceRole::ALL
            .into_iter()
            .map(|role| {
                let (perceptual_roughness, metallic) = role.roughness_metallic();
                let texture = match textures.texture(role.texture_name()) {
                    Ok(handle) => Some(handle),
                    Err(err) => {
                        warn!("{}", err);
                        None
                    }
                };
                let material = materials.add(StandardMaterial {
                    base_color: role.tint(palette).map_or(Color::WHITE, Color::Srgba),
                    base_color_texture: texture,
                    perceptual_roughness,
                    metallic,
                    ..default()
                });
                (role, material)
            })
            .collect();
        Self { surfaces }
    }

    pub fn get(&self, role: SurfaceRole) -> Handle<StandardMaterial> {
        self.surfaces.get(&role).cloned().unwrap_or_default()
    }
}

/// Solid material for small props that never change.
pub fn prop_material(
    materials: &mut Assets<StandardMaterial>,
    hex: u32,
    perceptual_roughness: f32,
    metallic: f32,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::Srgba(crate::engine::environment::bands::srgba_hex(hex)),
        perceptual_roughness,
        metallic,
        ..default()
    })
}

pub fn apply_room_palette(
    snapshot: Res<EnvironmentSnapshot>,
    room_materials: Option<Res<RoomMaterials>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(room_materials) = room_materials else {
        return;
    };
    if !snapshot.is_changed() && !room_materials.is_added() {
        return;
    }
    for role in SurfaceRole::ALL {
        let Some(tint) = role.tint(&snapshot.room_palette) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&room_materials.get(role)) {
            material.base_color = Color::Srgba(tint);
        }
    }
}

/// Replace fallback textures on every surface that uses a freshly loaded one.
pub fn swap_in_textures(
    mut swaps: EventReader<TextureSwapped>,
    room_materials: Option<Res<RoomMaterials>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(room_materials) = room_materials else {
        swaps.clear();
        return;
    };
    for swap in swaps.read() {
        for role in SurfaceRole::ALL {
            if role.texture_name() != swap.name {
                continue;
            }
            if let Some(material) = materials.get_mut(&room_materials.get(role)) {
                material.base_color_texture = Some(swap.handle.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::texture::SURFACE_TEXTURES;

    #[test]
    fn every_role_uses_a_known_texture() {
        for role in SurfaceRole::ALL {
            assert!(
                SURFACE_TEXTURES
                    .iter()
                    .any(|surface| surface.name == role.texture_name()),
                "{:?}",
                role
            );
        }
    }

    #[test]
    fn palette_roles_follow_the_snapshot() {
        let night = EnvironmentSnapshot::at(23.0).room_palette;
        let day = EnvironmentSnapshot::at(12.0).room_palette;
        assert_ne!(SurfaceRole::Desk.tint(&night), SurfaceRole::Desk.tint(&day));
        assert_eq!(SurfaceRole::Paper.tint(&night), None);
    }
}
