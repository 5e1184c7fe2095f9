//! On-screen UI: modal cards, controls, the native readout and full-screen notices.

/// Control events shared by RPC, keyboard and modal buttons.
pub mod controls;

/// Native environment readout (time, phase, speed, sound, room detail).
pub mod hud;

/// Evidence, file drawer and phone call modals.
pub mod modals;

/// Loading overlay and the renderer fault screen with Retry.
pub mod notices;
