//! Runtime diagnostics and fault handling.

/// Render watchdog and the transition to the faulted state.
pub mod fault;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native overlay.
pub mod fps_tracking;
