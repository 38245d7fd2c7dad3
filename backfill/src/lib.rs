//! Core crate for the `backfill` default-filling framework.
//!
//! `backfill` takes a value that has already been populated from somewhere
//! (a file, the environment, a test fixture) and fills in every field that is
//! still zero from a registry of typed defaults. The walk is driven by the
//! [`Mergeable`] trait, which the companion `backfill_macros` crate derives for
//! structs and enums.
//!
//! ```rust
//! use backfill::{DefaultRegistry, Mergeable, apply_defaults};
//!
//! #[derive(Debug, Default, PartialEq, Mergeable)]
//! struct Server {
//!     name: String,
//!     timeout: u64,
//! }
//!
//! let mut registry = DefaultRegistry::new();
//! registry.register(Server { name: String::new(), timeout: 30 });
//!
//! let mut server = Server { name: "edge".into(), timeout: 0 };
//! apply_defaults(&mut server, &registry)?;
//! assert_eq!(server, Server { name: "edge".into(), timeout: 30 });
//! # Ok::<(), backfill::MergeError>(())
//! ```
//!
//! The [`Processor`] wraps the same engine in an acquire, merge, transform and
//! validate pipeline.

pub use backfill_macros::Mergeable;

// Lets derive output (which names `::backfill`) compile inside this crate.
extern crate self as backfill;

mod dynamic;
mod error;
mod merger;
mod node;
mod pipeline;
#[cfg(feature = "figment")]
pub mod provider;
mod registry;
mod result_ext;

pub use dynamic::Dynamic;
pub use error::{BackfillError, BoxError, MergeError, Stage};
pub use merger::{DEFAULT_MAX_DEPTH, MergeOptions, Merger, apply_defaults, apply_defaults_with};
pub use node::{Mergeable, NodeKind, Relink, merge_field};
pub use pipeline::{ConfigProvider, Processor, Source};
pub use registry::DefaultRegistry;
pub use result_ext::BackfillResultExt;

/// Result type used by the processing pipeline.
///
/// Errors are wrapped in [`std::sync::Arc`] so they can be cloned and shared
/// between callers without re-running the pipeline.
pub type BackfillResult<T> = Result<T, std::sync::Arc<BackfillError>>;

/// Result type used by the merge engine.
pub type MergeResult<T> = Result<T, MergeError>;
