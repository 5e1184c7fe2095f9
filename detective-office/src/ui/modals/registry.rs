use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::evidence::{EvidenceCard, EvidencePresenter};
use super::file_drawer::FileDrawerPresenter;
use super::phone_call::PhoneCallPresenter;
use crate::content::case_files::CaseFileTable;
use crate::error::{OfficeError, OfficeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Evidence,
    CryptoEvidence,
    FileDrawer,
    PhoneCall,
}

impl ModalKind {
    pub const ALL: [ModalKind; 4] = [
        Self::Evidence,
        Self::CryptoEvidence,
        Self::FileDrawer,
        Self::PhoneCall,
    ];

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "evidence" => Some(Self::Evidence),
            "crypto_evidence" | "crypto" => Some(Self::CryptoEvidence),
            "file_drawer" | "drawer" => Some(Self::FileDrawer),
            "phone_call" | "phone" => Some(Self::PhoneCall),
            _ => None,
        }
    }

    /// Wire name, as used in RPC params and notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::Evidence => "evidence",
            Self::CryptoEvidence => "crypto_evidence",
            Self::FileDrawer => "file_drawer",
            Self::PhoneCall => "phone_call",
        }
    }
}

impl std::fmt::Display for ModalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What an interaction asks the modal layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalRequest {
    Evidence { id: String },
    CryptoEvidence { id: String },
    FileDrawer { id: String },
    PhoneCall,
}

impl ModalRequest {
    pub fn kind(&self) -> ModalKind {
        match self {
            Self::Evidence { .. } => ModalKind::Evidence,
            Self::CryptoEvidence { .. } => ModalKind::CryptoEvidence,
            Self::FileDrawer { .. } => ModalKind::FileDrawer,
            Self::PhoneCall => ModalKind::PhoneCall,
        }
    }
}

/// Side effects the modal layer needs executed by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEffect {
    Opened(ModalKind),
    PlayRingtone,
    StopRingtone,
    PlayNarration(ModalKind),
    PauseNarration(ModalKind),
    OpenExternalLink(String),
    Unmounted(ModalKind),
}

/// Result of an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened(Vec<ModalEffect>),
    /// That kind is already on screen; the request was dropped.
    AlreadyOpen,
}

/// At most one tracked modal per kind. Different kinds may coexist.
#[derive(Resource, Default, Debug)]
pub struct ModalRegistry {
    pub evidence: Option<EvidencePresenter>,
    pub crypto_evidence: Option<EvidencePresenter>,
    pub file_drawer: Option<FileDrawerPresenter>,
    pub phone_call: Option<PhoneCallPresenter>,
}

impl ModalRegistry {
    pub fn is_tracked(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::Evidence => self.evidence.is_some(),
            ModalKind::CryptoEvidence => self.crypto_evidence.is_some(),
            ModalKind::FileDrawer => self.file_drawer.is_some(),
            ModalKind::PhoneCall => self.phone_call.is_some(),
        }
    }

    pub fn tracked_kinds(&self) -> Vec<ModalKind> {
        ModalKind::ALL
            .into_iter()
            .filter(|kind| self.is_tracked(*kind))
            .collect()
    }

    pub fn open(
        &mut self,
        request: &ModalRequest,
        content: &CaseFileTable,
        rng: &mut impl Rng,
    ) -> OfficeResult<OpenOutcome> {
        let kind = request.kind();
        if self.is_tracked(kind) {
            return Ok(OpenOutcome::AlreadyOpen);
        }

        let mut effects = vec![ModalEffect::Opened(kind)];
        match request {
            ModalRequest::Evidence { id } => {
                let item = content
                    .evidence(id)
                    .ok_or_else(|| OfficeError::unknown("evidence", id.as_str()))?;
                self.evidence = Some(EvidencePresenter::new(kind, EvidenceCard::from(item)));
            }
            ModalRequest::CryptoEvidence { id } => {
                let item = content
                    .crypto(id)
                    .ok_or_else(|| OfficeError::unknown("crypto evidence", id.as_str()))?;
                self.crypto_evidence =
                    Some(EvidencePresenter::new(kind, EvidenceCard::from(item)));
            }
            ModalRequest::FileDrawer { id } => {
                let item = content
                    .drawer(id)
                    .ok_or_else(|| OfficeError::unknown("file drawer", id.as_str()))?;
                self.file_drawer = Some(FileDrawerPresenter::new(item.clone(), rng));
            }
            ModalRequest::PhoneCall => {
                let (call, ring) = PhoneCallPresenter::ring();
                self.phone_call = Some(call);
                effects.extend(ring);
            }
        }
        Ok(OpenOutcome::Opened(effects))
    }

    /// Idempotent: closing a closing or absent modal yields nothing.
    pub fn close(&mut self, kind: ModalKind) -> Vec<ModalEffect> {
        let effects = match kind {
            ModalKind::Evidence => self.evidence.as_mut().map(EvidencePresenter::request_close),
            ModalKind::CryptoEvidence => self
                .crypto_evidence
                .as_mut()
                .map(EvidencePresenter::request_close),
            ModalKind::FileDrawer => self
                .file_drawer
                .as_mut()
                .map(FileDrawerPresenter::request_close),
            ModalKind::PhoneCall => self
                .phone_call
                .as_mut()
                .map(PhoneCallPresenter::request_close),
        };
        effects.unwrap_or_default()
    }

    /// Escape closes everything on screen.
    pub fn close_all(&mut self) -> Vec<ModalEffect> {
        ModalKind::ALL
            .into_iter()
            .flat_map(|kind| self.close(kind))
            .collect()
    }

    pub fn answer_call(&mut self) -> Vec<ModalEffect> {
        self.phone_call
            .as_mut()
            .map(PhoneCallPresenter::answer)
            .unwrap_or_default()
    }

    pub fn toggle_narration(&mut self, kind: ModalKind) -> Vec<ModalEffect> {
        self.evidence_mut(kind)
            .map(EvidencePresenter::toggle_narration)
            .unwrap_or_default()
    }

    pub fn narration_started(&mut self, kind: ModalKind, ok: bool) {
        if let Some(presenter) = self.evidence_mut(kind) {
            presenter.narration_started(ok);
        }
    }

    pub fn open_article(&self, kind: ModalKind) -> Vec<ModalEffect> {
        let effects = match kind {
            ModalKind::Evidence => self.evidence.as_ref().map(EvidencePresenter::open_article),
            ModalKind::CryptoEvidence => self
                .crypto_evidence
                .as_ref()
                .map(EvidencePresenter::open_article),
            ModalKind::FileDrawer => self
                .file_drawer
                .as_ref()
                .map(FileDrawerPresenter::open_article),
            ModalKind::PhoneCall => None,
        };
        effects.unwrap_or_default()
    }

    /// Advance every tracked modal and drop the ones that finished closing.
    pub fn step(&mut self, delta: Duration) -> Vec<ModalEffect> {
        let mut effects = Vec::new();
        if let Some(modal) = self.evidence.as_mut() {
            effects.extend(modal.step(delta));
        }
        if let Some(modal) = self.crypto_evidence.as_mut() {
            effects.extend(modal.step(delta));
        }
        if let Some(modal) = self.file_drawer.as_mut() {
            effects.extend(modal.step(delta));
        }
        if let Some(modal) = self.phone_call.as_mut() {
            effects.extend(modal.step(delta));
        }

        for effect in &effects {
            if let ModalEffect::Unmounted(kind) = effect {
                self.untrack(*kind);
            }
        }
        effects
    }

    fn evidence_mut(&mut self, kind: ModalKind) -> Option<&mut EvidencePresenter> {
        match kind {
            ModalKind::Evidence => self.evidence.as_mut(),
            ModalKind::CryptoEvidence => self.crypto_evidence.as_mut(),
            _ => None,
        }
    }

    fn untrack(&mut self, kind: ModalKind) {
        match kind {
            ModalKind::Evidence => self.evidence = None,
            ModalKind::CryptoEvidence => self.crypto_evidence = None,
            ModalKind::FileDrawer => self.file_drawer = None,
            ModalKind::PhoneCall => self.phone_call = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (ModalRegistry, CaseFileTable, StdRng) {
        (
            ModalRegistry::default(),
            CaseFileTable::builtin().unwrap(),
            StdRng::seed_from_u64(42),
        )
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn third_drawer_opens_once() {
        let (mut registry, content, mut rng) = setup();
        let request = ModalRequest::FileDrawer {
            id: "drawer3".into(),
        };

        let first = registry.open(&request, &content, &mut rng).unwrap();
        assert_eq!(
            first,
            OpenOutcome::Opened(vec![ModalEffect::Opened(ModalKind::FileDrawer)])
        );
        let drawer = registry.file_drawer.as_ref().unwrap();
        assert_eq!(drawer.item().title, "$SLERF Investigation");
        assert_eq!(drawer.heading(), "CASE FILE: $SLERF");
        assert!(drawer.item().article_url.ends_with("af9f917684b8"));

        let second = registry.open(&request, &content, &mut rng).unwrap();
        assert_eq!(second, OpenOutcome::AlreadyOpen);
        assert_eq!(registry.tracked_kinds(), vec![ModalKind::FileDrawer]);
    }

    #[test]
    fn different_kinds_coexist() {
        let (mut registry, content, mut rng) = setup();
        registry
            .open(
                &ModalRequest::Evidence {
                    id: "desk_notes".into(),
                },
                &content,
                &mut rng,
            )
            .unwrap();
        let phone = registry
            .open(&ModalRequest::PhoneCall, &content, &mut rng)
            .unwrap();
        assert_eq!(
            phone,
            OpenOutcome::Opened(vec![
                ModalEffect::Opened(ModalKind::PhoneCall),
                ModalEffect::PlayRingtone
            ])
        );
        assert_eq!(
            registry.tracked_kinds(),
            vec![ModalKind::Evidence, ModalKind::PhoneCall]
        );
    }

    #[test]
    fn unknown_content_is_rejected() {
        let (mut registry, content, mut rng) = setup();
        let result = registry.open(
            &ModalRequest::CryptoEvidence { id: "doge".into() },
            &content,
            &mut rng,
        );
        assert!(result.is_err());
        assert!(!registry.is_tracked(ModalKind::CryptoEvidence));
    }

    #[test]
    fn closing_twice_equals_closing_once() {
        let (mut registry, content, mut rng) = setup();
        registry
            .open(&ModalRequest::PhoneCall, &content, &mut rng)
            .unwrap();

        assert_eq!(
            registry.close(ModalKind::PhoneCall),
            vec![ModalEffect::StopRingtone]
        );
        assert!(registry.close(ModalKind::PhoneCall).is_empty());

        let effects = registry.step(ms(500));
        assert_eq!(effects, vec![ModalEffect::Unmounted(ModalKind::PhoneCall)]);
        assert!(!registry.is_tracked(ModalKind::PhoneCall));
        assert!(registry.step(ms(500)).is_empty());
    }

    #[test]
    fn reopen_allowed_after_unmount() {
        let (mut registry, content, mut rng) = setup();
        let request = ModalRequest::CryptoEvidence { id: "gm".into() };
        registry.open(&request, &content, &mut rng).unwrap();
        registry.close(ModalKind::CryptoEvidence);
        registry.step(ms(500));
        assert!(matches!(
            registry.open(&request, &content, &mut rng).unwrap(),
            OpenOutcome::Opened(_)
        ));
    }

    #[test]
    fn still_closing_counts_as_open() {
        let (mut registry, content, mut rng) = setup();
        let request = ModalRequest::Evidence {
            id: "secret_photo".into(),
        };
        registry.open(&request, &content, &mut rng).unwrap();
        registry.close(ModalKind::Evidence);
        registry.step(ms(200));
        assert_eq!(
            registry.open(&request, &content, &mut rng).unwrap(),
            OpenOutcome::AlreadyOpen
        );
    }

    #[test]
    fn escape_closes_every_open_modal() {
        let (mut registry, content, mut rng) = setup();
        registry
            .open(&ModalRequest::PhoneCall, &content, &mut rng)
            .unwrap();
        registry
            .open(
                &ModalRequest::FileDrawer {
                    id: "drawer1".into(),
                },
                &content,
                &mut rng,
            )
            .unwrap();
        assert_eq!(registry.close_all(), vec![ModalEffect::StopRingtone]);
        let unmounted = registry.step(ms(500));
        assert_eq!(unmounted.len(), 2);
        assert!(registry.tracked_kinds().is_empty());
    }

    #[test]
    fn kind_names_round_trip_through_rpc_strings() {
        for kind in ModalKind::ALL {
            assert_eq!(ModalKind::from_string(kind.label()), Some(kind));
            assert_eq!(kind.to_string(), kind.label());
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::from(kind.label())
            );
        }
    }
}
