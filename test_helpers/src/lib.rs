//! Test helpers shared across crates.
//!
//! Provides figment jail wrappers and an in-memory capture for `tracing`
//! output.

pub mod figment;
pub mod logs;
