/// Delay between the backdrop appearing and the card scaling in.
pub const OPEN_DELAY_MS: u64 = 100;
/// Exit animation length before a modal is unmounted.
pub const CLOSE_DELAY_MS: u64 = 500;

pub const EVIDENCE_REVEAL_INTERVAL_MS: u64 = 20;
pub const PHONE_REVEAL_INTERVAL_MS: u64 = 30;

pub const PHONE_SCRIPT: &str = "This is the SEC. We've been monitoring your investigation into these presales. Continue your work, but be careful. These people have powerful connections. We'll be in touch.";
pub const CALLER_UNKNOWN: &str = "UNKNOWN CALLER";
pub const CALLER_IDENTIFIED: &str = "SEC ENFORCEMENT DIVISION";
pub const CALL_STATUS_WAITING: &str = "Call waiting...";
pub const CALL_STATUS_ACTIVE: &str = "Call in progress...";

pub const CASE_FILE_PREFIX: &str = "CASE FILE: ";
pub const ARTICLE_BUTTON_LABEL: &str = "Open Medium Article";
pub const EVIDENCE_REFERENCE_MIN: u32 = 100_000;
pub const EVIDENCE_REFERENCE_MAX: u32 = 999_999;
/// Window features passed when opening external articles.
pub const EXTERNAL_LINK_FEATURES: &str = "noopener,noreferrer";
