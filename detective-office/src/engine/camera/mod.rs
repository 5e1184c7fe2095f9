//! Office camera: a spherical rig that clicks retarget and the camera chases.

/// Camera rig resource, orbit input and smoothing.
pub mod focus_camera;
