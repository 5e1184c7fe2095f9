use std::time::Duration;

use constants::modal::EVIDENCE_REVEAL_INTERVAL_MS;

use super::lifecycle::{ModalLifecycle, ModalPhase};
use super::registry::{ModalEffect, ModalKind};
use super::reveal::TextReveal;
use crate::content::case_files::{CryptoEvidenceItem, EvidenceItem};

/// Narration loop state. `Starting` covers the gap until playback confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Off,
    Starting,
    Playing,
}

/// Text and links shown on an evidence card.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceCard {
    pub title: String,
    pub description: String,
    pub image: String,
    pub reference: Option<String>,
    pub article_url: Option<String>,
}

impl From<&EvidenceItem> for EvidenceCard {
    fn from(item: &EvidenceItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            reference: item.reference.clone(),
            article_url: None,
        }
    }
}

impl From<&CryptoEvidenceItem> for EvidenceCard {
    fn from(item: &CryptoEvidenceItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            reference: Some(item.token.clone()),
            article_url: item.article_url.clone(),
        }
    }
}

/// Evidence and crypto-evidence modals: typewriter description plus an
/// optional, user-started narration loop.
#[derive(Debug, Clone)]
pub struct EvidencePresenter {
    kind: ModalKind,
    card: EvidenceCard,
    lifecycle: ModalLifecycle,
    reveal: TextReveal,
    narration: NarrationState,
}

impl EvidencePresenter {
    pub fn new(kind: ModalKind, card: EvidenceCard) -> Self {
        let reveal = TextReveal::new(
            card.description.clone(),
            Duration::from_millis(EVIDENCE_REVEAL_INTERVAL_MS),
        );
        Self {
            kind,
            card,
            lifecycle: ModalLifecycle::new(),
            reveal,
            narration: NarrationState::Off,
        }
    }

    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn card(&self) -> &EvidenceCard {
        &self.card
    }

    pub fn lifecycle(&self) -> &ModalLifecycle {
        &self.lifecycle
    }

    pub fn revealed_text(&self) -> &str {
        self.reveal.visible()
    }

    pub fn reveal_complete(&self) -> bool {
        self.reveal.is_complete()
    }

    pub fn narration(&self) -> NarrationState {
        self.narration
    }

    /// Start or stop narration. Starting only happens from here; a toggle
    /// while a start is pending is ignored.
    pub fn toggle_narration(&mut self) -> Vec<ModalEffect> {
        if !self.lifecycle.is_active() {
            return Vec::new();
        }
        match self.narration {
            NarrationState::Off => {
                self.narration = NarrationState::Starting;
                vec![ModalEffect::PlayNarration(self.kind)]
            }
            NarrationState::Starting => Vec::new(),
            NarrationState::Playing => {
                self.narration = NarrationState::Off;
                vec![ModalEffect::PauseNarration(self.kind)]
            }
        }
    }

    /// Playback outcome for a pending start. A blocked start leaves narration off.
    pub fn narration_started(&mut self, ok: bool) {
        if self.narration == NarrationState::Starting {
            self.narration = if ok {
                NarrationState::Playing
            } else {
                NarrationState::Off
            };
        }
    }

    pub fn open_article(&self) -> Vec<ModalEffect> {
        match (&self.card.article_url, self.lifecycle.is_active()) {
            (Some(url), true) => vec![ModalEffect::OpenExternalLink(url.clone())],
            _ => Vec::new(),
        }
    }

    pub fn request_close(&mut self) -> Vec<ModalEffect> {
        if !self.lifecycle.request_close() {
            return Vec::new();
        }
        self.reveal.cancel();
        let mut effects = Vec::new();
        if self.narration != NarrationState::Off {
            self.narration = NarrationState::Off;
            effects.push(ModalEffect::PauseNarration(self.kind));
        }
        effects
    }

    pub fn step(&mut self, delta: Duration) -> Vec<ModalEffect> {
        let mut effects = Vec::new();
        if self.lifecycle.is_active() {
            self.reveal.tick(delta);
        }
        if self.lifecycle.step(delta) == Some(ModalPhase::Closed) {
            effects.push(ModalEffect::Unmounted(self.kind));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter(description: &str) -> EvidencePresenter {
        EvidencePresenter::new(
            ModalKind::Evidence,
            EvidenceCard {
                title: "Case Notes".into(),
                description: description.into(),
                image: "images/detective-desk-notes.png".into(),
                reference: Some("case-ref-123456".into()),
                article_url: None,
            },
        )
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn description_types_out_at_twenty_ms() {
        let mut modal = presenter("Large raises.");
        modal.step(ms(100));
        assert_eq!(modal.revealed_text(), "Large");
        modal.step(ms(1000));
        assert!(modal.reveal_complete());
    }

    #[test]
    fn narration_never_starts_by_itself() {
        let mut modal = presenter("Missing funds.");
        modal.step(ms(5000));
        assert_eq!(modal.narration(), NarrationState::Off);
    }

    #[test]
    fn blocked_narration_stays_off() {
        let mut modal = presenter("Broken promises.");
        assert_eq!(
            modal.toggle_narration(),
            vec![ModalEffect::PlayNarration(ModalKind::Evidence)]
        );
        modal.narration_started(false);
        assert_eq!(modal.narration(), NarrationState::Off);
        // Close has nothing to pause.
        assert!(modal.request_close().is_empty());
    }

    #[test]
    fn toggle_while_starting_is_ignored() {
        let mut modal = presenter("Wire transfers.");
        assert_eq!(
            modal.toggle_narration(),
            vec![ModalEffect::PlayNarration(ModalKind::Evidence)]
        );
        assert!(modal.toggle_narration().is_empty());
        assert_eq!(modal.narration(), NarrationState::Starting);

        // The single pending start is confirmed and can then be paused.
        modal.narration_started(true);
        assert_eq!(modal.narration(), NarrationState::Playing);
        assert_eq!(
            modal.toggle_narration(),
            vec![ModalEffect::PauseNarration(ModalKind::Evidence)]
        );
        assert_eq!(modal.narration(), NarrationState::Off);
    }

    #[test]
    fn close_while_starting_stops_the_pending_player() {
        let mut modal = presenter("Offshore accounts.");
        modal.toggle_narration();
        assert_eq!(
            modal.request_close(),
            vec![ModalEffect::PauseNarration(ModalKind::Evidence)]
        );
        // A late confirmation does not revive it.
        modal.narration_started(true);
        assert_eq!(modal.narration(), NarrationState::Off);
    }

    #[test]
    fn close_twice_pauses_narration_once() {
        let mut modal = presenter("silence");
        modal.toggle_narration();
        modal.narration_started(true);

        let first = modal.request_close();
        let second = modal.request_close();
        assert_eq!(first, vec![ModalEffect::PauseNarration(ModalKind::Evidence)]);
        assert!(second.is_empty());

        let unmount: Vec<_> = (0..10).flat_map(|_| modal.step(ms(100))).collect();
        assert_eq!(unmount, vec![ModalEffect::Unmounted(ModalKind::Evidence)]);
    }

    #[test]
    fn close_discards_partial_text() {
        let mut modal = presenter("The trail leads straight to CEXs");
        modal.step(ms(100));
        modal.request_close();
        assert_eq!(modal.revealed_text(), "");
        modal.step(ms(200));
        assert_eq!(modal.revealed_text(), "");
    }

    #[test]
    fn crypto_card_links_its_article() {
        let item = CryptoEvidenceItem {
            id: "nap".into(),
            title: "$NAP".into(),
            token: "$NAP".into(),
            description: "Founder: Kero.".into(),
            image: "images/nap.webp".into(),
            board_position: [-0.4, -0.2],
            article_url: Some("https://medium.com/@MotiBanks/nap".into()),
        };
        let modal = EvidencePresenter::new(ModalKind::CryptoEvidence, EvidenceCard::from(&item));
        assert_eq!(
            modal.open_article(),
            vec![ModalEffect::OpenExternalLink(
                "https://medium.com/@MotiBanks/nap".into()
            )]
        );
    }
}
