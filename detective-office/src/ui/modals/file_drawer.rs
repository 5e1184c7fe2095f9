use std::time::Duration;

use constants::modal::{CASE_FILE_PREFIX, EVIDENCE_REFERENCE_MAX, EVIDENCE_REFERENCE_MIN};
use rand::Rng;

use super::lifecycle::{ModalLifecycle, ModalPhase};
use super::registry::{ModalEffect, ModalKind};
use crate::content::case_files::FileDrawerItem;

/// Case file pulled from the cabinet.
#[derive(Debug, Clone)]
pub struct FileDrawerPresenter {
    item: FileDrawerItem,
    evidence_reference: u32,
    lifecycle: ModalLifecycle,
}

impl FileDrawerPresenter {
    pub fn new(item: FileDrawerItem, rng: &mut impl Rng) -> Self {
        Self {
            item,
            evidence_reference: rng.gen_range(EVIDENCE_REFERENCE_MIN..=EVIDENCE_REFERENCE_MAX),
            lifecycle: ModalLifecycle::new(),
        }
    }

    pub fn item(&self) -> &FileDrawerItem {
        &self.item
    }

    pub fn lifecycle(&self) -> &ModalLifecycle {
        &self.lifecycle
    }

    pub fn heading(&self) -> String {
        format!("{CASE_FILE_PREFIX}{}", self.item.token)
    }

    pub fn evidence_reference(&self) -> u32 {
        self.evidence_reference
    }

    /// Hand the article to the browser. Nothing waits on the result.
    pub fn open_article(&self) -> Vec<ModalEffect> {
        if self.lifecycle.is_active() {
            vec![ModalEffect::OpenExternalLink(self.item.article_url.clone())]
        } else {
            Vec::new()
        }
    }

    pub fn request_close(&mut self) -> Vec<ModalEffect> {
        self.lifecycle.request_close();
        Vec::new()
    }

    pub fn step(&mut self, delta: Duration) -> Vec<ModalEffect> {
        if self.lifecycle.step(delta) == Some(ModalPhase::Closed) {
            vec![ModalEffect::Unmounted(ModalKind::FileDrawer)]
        } else {
            Vec::new()
        }
    }
}
