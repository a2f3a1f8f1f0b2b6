//! Roundscope Common Utilities
//!
//! Shared infrastructure for all Roundscope crates:
//! - Error types and result aliases
//! - Timecode utilities for the sampling grid and time labels
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod timecode;

pub use config::*;
pub use error::*;
pub use timecode::*;
