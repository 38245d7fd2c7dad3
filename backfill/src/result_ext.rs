//! Extension for mapping errors to `BackfillResult` concisely.
//!
//! Replaces `.map_err(|e| Arc::new(BackfillError::from(e)))` chains when a
//! merge or stage failure needs to leave a pipeline function.
//!
//! # Examples
//!
//! ```
//! use backfill::{BackfillResult, BackfillResultExt, DefaultRegistry, Mergeable, apply_defaults};
//!
//! #[derive(Mergeable)]
//! struct Limits {
//!     burst: u32,
//! }
//!
//! fn fill(limits: &mut Limits, registry: &DefaultRegistry) -> BackfillResult<()> {
//!     apply_defaults(limits, registry).into_backfill()
//! }
//!
//! let mut limits = Limits { burst: 0 };
//! let registry = DefaultRegistry::new().with(Limits { burst: 10 });
//! assert!(fill(&mut limits, &registry).is_ok());
//! assert_eq!(limits.burst, 10);
//! ```

use std::sync::Arc;

use crate::{BackfillError, BackfillResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<BackfillError>` into a [`BackfillResult<T>`].
pub trait BackfillResultExt<T, E> {
    /// Convert `Result<T, E>` into `BackfillResult<T>` using
    /// `Into<BackfillError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<BackfillError>`.
    fn into_backfill(self) -> BackfillResult<T>;
}

impl<T, E> BackfillResultExt<T, E> for Result<T, E>
where
    E: Into<BackfillError>,
{
    fn into_backfill(self) -> BackfillResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
