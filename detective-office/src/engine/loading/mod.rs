//! Asset loading for the office scene.
//!
//! Surface textures and the case-file table are requested at startup and
//! polled until every one has either loaded or fallen back, at which point
//! the app moves on to composing the scene.

/// Case-file table loading with the compiled-in table as fallback.
pub mod content_loader;

/// Loading progress tracking resource for state transitions.
///
/// Reported to the host page as `loading_progress` notifications.
pub mod progress;

/// Surface texture cache with synchronous fallbacks and asynchronous swap-in.
pub mod texture_cache;
