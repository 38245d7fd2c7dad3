//! Acquire, merge, transform and validate pipeline.
//!
//! A [`Processor`] is configured once through `with_*` calls and consumed by
//! [`Processor::build`]. Each stage short-circuits the rest on failure and
//! the returned [`crate::BackfillError`] records which stage failed.

mod processor;
mod source;

pub use processor::Processor;
pub use source::{ConfigProvider, Source};
