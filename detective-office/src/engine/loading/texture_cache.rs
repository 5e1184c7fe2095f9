use std::collections::HashMap;

use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::color::ColorToPacked;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use constants::texture::{
    FALLBACK_TEXTURE_SIZE, SURFACE_TEXTURES, SurfaceTexture, TEXTURE_DIRECTORY, TEXTURE_EXTENSION,
};

use crate::engine::environment::bands::srgba_hex;
use crate::error::{OfficeError, OfficeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
struct CachedTexture {
    fallback: Handle<Image>,
    loaded: Handle<Image>,
    status: TextureStatus,
}

/// Fired when a real texture replaces its fallback.
#[derive(Event, Debug, Clone)]
pub struct TextureSwapped {
    pub name: &'static str,
    pub handle: Handle<Image>,
}

/// Surface textures by symbolic name. A solid fallback is always available;
/// the file on disk replaces it once loaded.
#[derive(Resource, Debug, Default)]
pub struct TextureCache {
    entries: HashMap<&'static str, CachedTexture>,
}

impl TextureCache {
    /// Create fallbacks and start loading every surface texture.
    pub fn request_all(&mut self, images: &mut Assets<Image>, asset_server: &AssetServer) {
        for surface in SURFACE_TEXTURES {
            if self.entries.contains_key(surface.name) {
                continue;
            }
            let fallback = images.add(fallback_image(surface));
            let loaded = asset_server.load_with_settings(texture_path(surface.name), repeat_sampler);
            self.track(surface.name, fallback, loaded);
        }
        println!("✓ Requested {} surface textures", self.total());
    }

    fn track(&mut self, name: &'static str, fallback: Handle<Image>, loaded: Handle<Image>) {
        self.entries.insert(
            name,
            CachedTexture {
                fallback,
                loaded,
                status: TextureStatus::Pending,
            },
        );
    }

    /// Best texture available right now for `name`.
    pub fn texture(&self, name: &str) -> OfficeResult<Handle<Image>> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| OfficeError::unknown("texture", name))?;
        Ok(match entry.status {
            TextureStatus::Ready => entry.loaded.clone(),
            TextureStatus::Pending | TextureStatus::Failed => entry.fallback.clone(),
        })
    }

    pub fn status(&self, name: &str) -> Option<TextureStatus> {
        self.entries.get(name).map(|entry| entry.status)
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn processed(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.status != TextureStatus::Pending)
            .count()
    }

    pub fn progress(&self) -> f32 {
        if self.entries.is_empty() {
            return 1.0;
        }
        self.processed() as f32 / self.total() as f32
    }

    pub fn is_settled(&self) -> bool {
        self.processed() == self.total()
    }

    /// Record a load result. Returns the loaded handle when it should be swapped in.
    fn settle(&mut self, name: &str, ok: bool) -> Option<Handle<Image>> {
        let entry = self.entries.get_mut(name)?;
        if entry.status != TextureStatus::Pending {
            return None;
        }
        if ok {
            entry.status = TextureStatus::Ready;
            Some(entry.loaded.clone())
        } else {
            entry.status = TextureStatus::Failed;
            None
        }
    }
}

pub fn texture_path(name: &str) -> String {
    format!("{}/{}.{}", TEXTURE_DIRECTORY, name, TEXTURE_EXTENSION)
}

/// Solid-colour stand-in with the surface's role colour.
pub fn fallback_image(surface: SurfaceTexture) -> Image {
    let color = srgba_hex(surface.fallback).to_u8_array();
    Image::new_fill(
        Extent3d {
            width: FALLBACK_TEXTURE_SIZE,
            height: FALLBACK_TEXTURE_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &color,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn repeat_sampler(settings: &mut ImageLoaderSettings) {
    settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
}

pub fn request_surface_textures(
    mut cache: ResMut<TextureCache>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    cache.request_all(&mut images, &asset_server);
}

/// Poll pending loads. Failures keep the fallback and are only logged.
pub fn poll_surface_textures(
    mut cache: ResMut<TextureCache>,
    asset_server: Res<AssetServer>,
    mut swaps: EventWriter<TextureSwapped>,
) {
    if cache.is_settled() {
        return;
    }
    let pending: Vec<(&'static str, Handle<Image>)> = cache
        .entries
        .iter()
        .filter(|(_, entry)| entry.status == TextureStatus::Pending)
        .map(|(name, entry)| (*name, entry.loaded.clone()))
        .collect();

    for (name, handle) in pending {
        match asset_server.get_load_state(&handle) {
            Some(LoadState::Loaded) => {
                if let Some(handle) = cache.settle(name, true) {
                    println!("✓ Texture loaded: {}", name);
                    swaps.write(TextureSwapped { name, handle });
                }
            }
            Some(LoadState::Failed(err)) => {
                warn!(
                    "{}",
                    OfficeError::AssetLoad {
                        path: texture_path(name),
                        reason: err.to_string(),
                    }
                );
                cache.settle(name, false);
            }
            _ => {}
        }
    }
}
