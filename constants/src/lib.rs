//! Shared tuning constants for the detective office scene.
//!
//! Values are grouped by the concern that reads them. Colours are stored as
//! `0xRRGGBB` integers and converted by the engine at bind time.

pub mod audio;
pub mod camera;
pub mod modal;
pub mod palette;
pub mod render_settings;
pub mod texture;
pub mod time_of_day;
pub mod weather;
