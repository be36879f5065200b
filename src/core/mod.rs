//! Shared building blocks
//!
//! - **config**: product profile and release environment
//! - **error**: error types with exit codes and help messages

pub mod config;
pub mod error;
