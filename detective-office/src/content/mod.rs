//! Narrative content shown by the modals.
//!
//! All copy lives in one flat JSON table (`assets/content/case_files.json`)
//! keyed by id. The same file is compiled in and used whenever the asset
//! server cannot deliver it.

pub mod case_files;
