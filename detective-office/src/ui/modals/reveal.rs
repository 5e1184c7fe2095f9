use std::time::Duration;

/// Character-by-character reveal of a fixed script.
///
/// Grows by one character per interval. A cancelled reveal drops its
/// partial text and never resumes.
#[derive(Debug, Clone)]
pub struct TextReveal {
    script: String,
    /// Byte offset of every character boundary, plus the total length.
    boundaries: Vec<usize>,
    shown: usize,
    interval: Duration,
    carry: Duration,
    cancelled: bool,
}

impl TextReveal {
    pub fn new(script: impl Into<String>, interval: Duration) -> Self {
        let script = script.into();
        let mut boundaries: Vec<usize> = script.char_indices().map(|(i, _)| i).skip(1).collect();
        boundaries.push(script.len());
        Self {
            script,
            boundaries,
            shown: 0,
            interval: interval.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
            cancelled: false,
        }
    }

    pub fn visible(&self) -> &str {
        if self.shown == 0 {
            return "";
        }
        &self.script[..self.boundaries[self.shown - 1]]
    }

    pub fn visible_chars(&self) -> usize {
        self.shown
    }

    pub fn total_chars(&self) -> usize {
        if self.script.is_empty() {
            0
        } else {
            self.boundaries.len()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shown == self.total_chars()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.shown = 0;
        self.carry = Duration::ZERO;
    }

    /// Advance by `delta`. Returns true when new characters became visible.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.cancelled || self.is_complete() {
            return false;
        }

        self.carry += delta;
        let before = self.shown;
        while self.carry >= self.interval && !self.is_complete() {
            self.carry -= self.interval;
            self.shown += 1;
        }
        if self.is_complete() {
            self.carry = Duration::ZERO;
        }
        self.shown != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn reveals_one_character_per_interval() {
        let mut reveal = TextReveal::new("Case", ms(20));
        assert_eq!(reveal.visible(), "");
        assert!(!reveal.tick(ms(19)));
        assert!(reveal.tick(ms(1)));
        assert_eq!(reveal.visible(), "C");
        assert!(reveal.tick(ms(45)));
        assert_eq!(reveal.visible(), "Cas");
    }

    #[test]
    fn stops_growing_once_complete() {
        let mut reveal = TextReveal::new("ok", ms(30));
        reveal.tick(ms(1000));
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible(), "ok");
        assert!(!reveal.tick(ms(1000)));
        assert_eq!(reveal.visible(), "ok");
    }

    #[test]
    fn respects_multibyte_characters() {
        let mut reveal = TextReveal::new("CEXs — and", ms(10));
        reveal.tick(ms(60));
        assert_eq!(reveal.visible(), "CEXs —");
        assert_eq!(reveal.total_chars(), 10);
    }

    #[test]
    fn cancel_discards_and_never_resumes() {
        let mut reveal = TextReveal::new("silence", ms(20));
        reveal.tick(ms(60));
        reveal.cancel();
        assert_eq!(reveal.visible(), "");
        assert!(!reveal.tick(ms(1000)));
        assert_eq!(reveal.visible(), "");
        assert!(reveal.is_cancelled());
    }

    #[test]
    fn empty_script_is_immediately_complete() {
        let mut reveal = TextReveal::new("", ms(20));
        assert!(reveal.is_complete());
        assert!(!reveal.tick(ms(100)));
    }
}
