//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with scene, modal, audio and RPC plugins.
pub mod app_setup;

/// Application state machine and loading progress transitions.
pub mod app_state;

/// WebGPU/WebGL2 probe run before the app is built.
pub mod capability;

/// Per-session settings seeded into the clock and scene.
pub mod session;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
