//! Varta Common Utilities
//!
//! Shared infrastructure for all Varta crates:
//! - Error types and result aliases
//! - Clock abstraction for datelines and export timestamps
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
