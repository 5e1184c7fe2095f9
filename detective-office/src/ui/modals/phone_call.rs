use std::time::Duration;

use constants::modal::{
    CALL_STATUS_ACTIVE, CALL_STATUS_WAITING, CALLER_IDENTIFIED, CALLER_UNKNOWN, PHONE_REVEAL_INTERVAL_MS,
    PHONE_SCRIPT,
};

use super::lifecycle::{ModalLifecycle, ModalPhase};
use super::registry::{ModalEffect, ModalKind};
use super::reveal::TextReveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Ringing,
    Answered,
}

/// Incoming call: rings until answered, then types out the caller's script.
#[derive(Debug, Clone)]
pub struct PhoneCallPresenter {
    lifecycle: ModalLifecycle,
    call: CallState,
    script: Option<TextReveal>,
}

impl PhoneCallPresenter {
    /// New ringing call along with the effects needed to start it.
    pub fn ring() -> (Self, Vec<ModalEffect>) {
        (
            Self {
                lifecycle: ModalLifecycle::new(),
                call: CallState::Ringing,
                script: None,
            },
            vec![ModalEffect::PlayRingtone],
        )
    }

    pub fn lifecycle(&self) -> &ModalLifecycle {
        &self.lifecycle
    }

    pub fn call_state(&self) -> CallState {
        self.call
    }

    pub fn caller_label(&self) -> &'static str {
        match self.call {
            CallState::Ringing => CALLER_UNKNOWN,
            CallState::Answered => CALLER_IDENTIFIED,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.call {
            CallState::Ringing => CALL_STATUS_WAITING,
            CallState::Answered => CALL_STATUS_ACTIVE,
        }
    }

    pub fn transcript(&self) -> &str {
        self.script.as_ref().map(TextReveal::visible).unwrap_or("")
    }

    pub fn transcript_complete(&self) -> bool {
        self.script.as_ref().is_some_and(TextReveal::is_complete)
    }

    /// Ringing → Answered. There is no way back.
    pub fn answer(&mut self) -> Vec<ModalEffect> {
        if self.call != CallState::Ringing || !self.lifecycle.is_active() {
            return Vec::new();
        }
        self.call = CallState::Answered;
        self.script = Some(TextReveal::new(
            PHONE_SCRIPT,
            Duration::from_millis(PHONE_REVEAL_INTERVAL_MS),
        ));
        vec![ModalEffect::StopRingtone]
    }

    /// Decline and close share this path.
    pub fn request_close(&mut self) -> Vec<ModalEffect> {
        if !self.lifecycle.request_close() {
            return Vec::new();
        }
        if let Some(script) = self.script.as_mut() {
            script.cancel();
        }
        match self.call {
            CallState::Ringing => vec![ModalEffect::StopRingtone],
            CallState::Answered => Vec::new(),
        }
    }

    pub fn step(&mut self, delta: Duration) -> Vec<ModalEffect> {
        if self.lifecycle.is_active() {
            if let Some(script) = self.script.as_mut() {
                script.tick(delta);
            }
        }
        if self.lifecycle.step(delta) == Some(ModalPhase::Closed) {
            vec![ModalEffect::Unmounted(ModalKind::PhoneCall)]
        } else {
            Vec::new()
        }
    }
}
