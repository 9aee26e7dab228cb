//! Thermwatch Common Utilities
//!
//! Shared infrastructure for all Thermwatch crates:
//! - Error types and result aliases
//! - Wire timestamp parsing and whole-second truncation
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
