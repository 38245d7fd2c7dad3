//! Error types produced by the merge engine and the processing pipeline.

mod constructors;
mod types;

pub use types::{BackfillError, BoxError, MergeError, Stage};
