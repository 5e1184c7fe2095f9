//! Time of day and everything derived from it.
//!
//! The clock owns the single `timeOfDay` scalar. The snapshot is a pure
//! function of that scalar and is what the scene and audio bind to.

/// Clock state, auto-advance and display helpers.
pub mod clock;

/// Band classification for interpolated and stepped properties.
pub mod bands;

/// Per-frame environment snapshot built from the current hour.
pub mod snapshot;
