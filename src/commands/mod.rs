//! CLI commands for appcast-gen
//!
//! - **generate**: add or refresh one release entry in the feed

pub mod generate;

pub use generate::{GenerateOptions, run_generate};
