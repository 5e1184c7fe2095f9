use std::time::Duration;

use constants::modal::{CLOSE_DELAY_MS, OPEN_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Backdrop shown, card still scaled down.
    Opening,
    Visible,
    /// Backdrop and card hidden, waiting for the exit animation.
    Closing,
    Closed,
}

/// Open/close choreography shared by every modal kind.
#[derive(Debug, Clone)]
pub struct ModalLifecycle {
    phase: ModalPhase,
    in_phase: Duration,
}

impl Default for ModalLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalLifecycle {
    pub fn new() -> Self {
        Self {
            phase: ModalPhase::Opening,
            in_phase: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn backdrop_visible(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Visible)
    }

    pub fn card_zoomed(&self) -> bool {
        self.phase == ModalPhase::Visible
    }

    /// Still accepting input (close, answer, toggles).
    pub fn is_active(&self) -> bool {
        self.backdrop_visible()
    }

    pub fn is_closed(&self) -> bool {
        self.phase == ModalPhase::Closed
    }

    /// Start the exit animation. Only the first call does anything.
    pub fn request_close(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.enter(ModalPhase::Closing);
        true
    }

    /// Advance timers. Returns the new phase when one was entered.
    pub fn step(&mut self, delta: Duration) -> Option<ModalPhase> {
        self.in_phase += delta;
        match self.phase {
            ModalPhase::Opening if self.in_phase >= Duration::from_millis(OPEN_DELAY_MS) => {
                self.enter(ModalPhase::Visible);
                Some(ModalPhase::Visible)
            }
            ModalPhase::Closing if self.in_phase >= Duration::from_millis(CLOSE_DELAY_MS) => {
                self.enter(ModalPhase::Closed);
                Some(ModalPhase::Closed)
            }
            _ => None,
        }
    }

    fn enter(&mut self, phase: ModalPhase) {
        self.phase = phase;
        self.in_phase = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn backdrop_first_then_card() {
        let mut lifecycle = ModalLifecycle::new();
        assert!(lifecycle.backdrop_visible());
        assert!(!lifecycle.card_zoomed());

        assert_eq!(lifecycle.step(ms(99)), None);
        assert_eq!(lifecycle.step(ms(1)), Some(ModalPhase::Visible));
        assert!(lifecycle.card_zoomed());
    }

    #[test]
    fn close_hides_everything_then_unmounts() {
        let mut lifecycle = ModalLifecycle::new();
        lifecycle.step(ms(100));

        assert!(lifecycle.request_close());
        assert!(!lifecycle.backdrop_visible());
        assert!(!lifecycle.card_zoomed());
        assert_eq!(lifecycle.step(ms(499)), None);
        assert_eq!(lifecycle.step(ms(1)), Some(ModalPhase::Closed));
        assert!(lifecycle.is_closed());
    }

    #[test]
    fn second_close_is_a_no_op() {
        let mut lifecycle = ModalLifecycle::new();
        assert!(lifecycle.request_close());
        lifecycle.step(ms(200));
        assert!(!lifecycle.request_close());
        // The exit timer was not restarted by the second request.
        assert_eq!(lifecycle.step(ms(300)), Some(ModalPhase::Closed));
        assert!(!lifecycle.request_close());
    }

    #[test]
    fn closing_during_opening_skips_visible() {
        let mut lifecycle = ModalLifecycle::new();
        lifecycle.step(ms(50));
        lifecycle.request_close();
        assert_eq!(lifecycle.step(ms(100)), None);
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);
    }
}
