use bevy::prelude::*;
use serde::Serialize;

use super::content_loader::ContentLoader;
use super::texture_cache::TextureCache;
use crate::rpc::web_rpc::WebRpcInterface;

/// Snapshot of what the loading screen reports.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct LoadingProgress {
    pub content_ready: bool,
    pub textures_processed: usize,
    pub textures_total: usize,
}

impl LoadingProgress {
    pub fn fraction(&self) -> f32 {
        // Content counts as one more item alongside the textures.
        let total = self.textures_total + 1;
        let done = self.textures_processed + usize::from(self.content_ready);
        done as f32 / total as f32
    }

    pub fn is_complete(&self) -> bool {
        self.content_ready && self.textures_processed >= self.textures_total
    }
}

pub fn update_loading_progress(
    loader: Res<ContentLoader>,
    cache: Res<TextureCache>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let next = LoadingProgress {
        content_ready: loader.is_settled(),
        textures_processed: cache.processed(),
        textures_total: cache.total(),
    };
    if *progress == next {
        return;
    }
    *progress = next;
    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "progress": next.fraction(),
            "content_ready": next.content_ready,
            "textures_processed": next.textures_processed,
            "textures_total": next.textures_total,
        }),
    );
}
