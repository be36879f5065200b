//! Appcast feed maintenance
//!
//! - **bootstrap**: create an empty feed when none exists
//! - **artifact**: find the packaged zip and its size
//! - **notes**: resolve release notes to entry markup
//! - **entry**: render one `<item>` fragment
//! - **document**: remove stale entries and insert the new one

pub mod artifact;
pub mod bootstrap;
pub mod document;
pub mod entry;
pub mod notes;
