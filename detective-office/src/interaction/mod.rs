//! Pointer interaction with scene props.
//!
//! Props carry an [`router::Interactive`] component. Picking observers turn
//! hover and click into a declarative [`hover::HoveredObject`] and
//! [`router::InteractionActivated`] events; routing decides which modal,
//! camera focus and sound cue an activation produces.

pub mod hover;
pub mod router;
