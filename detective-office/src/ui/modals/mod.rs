//! Modal presenters for evidence, crypto evidence, file drawers and the
//! phone call.
//!
//! Each presenter is a small state machine advanced by frame time. The
//! registry tracks at most one presenter per kind and reports side effects
//! as [`registry::ModalEffect`] values; [`presenter`] turns those into UI
//! trees, sounds and links.

pub mod evidence;
pub mod file_drawer;
pub mod lifecycle;
pub mod phone_call;
pub mod presenter;
pub mod registry;
pub mod reveal;
