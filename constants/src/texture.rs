/// Symbolic surface texture with its synchronous fallback colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTexture {
    pub name: &'static str,
    pub fallback: u32,
}

pub const SURFACE_TEXTURES: [SurfaceTexture; 7] = [
    SurfaceTexture { name: "wood", fallback: 0x8b4513 },
    SurfaceTexture { name: "leather", fallback: 0x8b2500 },
    SurfaceTexture { name: "cork", fallback: 0xd2b48c },
    SurfaceTexture { name: "paper", fallback: 0xf5f5dc },
    SurfaceTexture { name: "metal", fallback: 0xa9a9a9 },
    SurfaceTexture { name: "floor", fallback: 0x5d4037 },
    SurfaceTexture { name: "wallpaper", fallback: 0x2c3e50 },
];

pub const TEXTURE_DIRECTORY: &str = "textures";
pub const TEXTURE_EXTENSION: &str = "jpg";
/// Edge length of generated fallback textures.
pub const FALLBACK_TEXTURE_SIZE: u32 = 2;
