//! Engine-side systems: clock and environment, scene, audio, camera,
//! loading and diagnostics.

pub mod audio;
pub mod camera;
pub mod core;
pub mod environment;
pub mod loading;
pub mod scene;
pub mod scheduler;
pub mod systems;
