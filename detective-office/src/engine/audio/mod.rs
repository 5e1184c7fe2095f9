//! Ambient soundscape and modal sound effects.
//!
//! `controller` is a pure state machine that decides what to play and when;
//! `playback` executes its commands against Bevy's audio sinks.

/// Toggle, stagger, fade and volume-bucket logic for the four ambient channels.
pub mod controller;

/// Bevy systems that run controller commands and modal loops.
pub mod playback;
