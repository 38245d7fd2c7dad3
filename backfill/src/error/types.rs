//! Primary error enums for merging and pipeline processing.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by caller-supplied loaders, transformers and
/// validators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while walking a value graph.
///
/// Any mutation already applied before the failure is kept: the engine never
/// rolls a value back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The root is a plain scalar rather than a record or a handle to one.
    #[error("config must be a record or a container of records, got `{type_name}`")]
    NotAPointer {
        /// Type name of the rejected root.
        type_name: &'static str,
    },

    /// The root handle holds nothing.
    #[error("config cannot be nil: `{type_name}` is empty")]
    NilConfig {
        /// Type name of the empty root handle.
        type_name: &'static str,
    },

    /// A reference was reached again while still active on the traversal path.
    ///
    /// Also returned when an `Rc<RefCell<_>>` referent cannot be borrowed
    /// mutably because the caller holds a borrow of it across the merge call.
    /// The merge cannot tell that case apart from a cycle.
    #[error("circular reference detected at `{type_name}`")]
    CircularReference {
        /// Type name of the referent that closed the cycle.
        type_name: &'static str,
    },

    /// The walk descended further than the configured limit.
    #[error("maximum merge depth of {limit} exceeded at `{type_name}`")]
    DepthExceeded {
        /// Configured depth limit.
        limit: usize,
        /// Type name of the node that would have exceeded the limit.
        type_name: &'static str,
    },
}

/// Pipeline stage in which a [`BackfillError`] arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Obtaining the root value from its source.
    Acquire,
    /// Filling zero values from the registry.
    Defaults,
    /// Running the caller-supplied transformer.
    Transform,
    /// Running the caller-supplied validator.
    Validate,
}

impl Stage {
    /// Short lowercase label used in error messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acquire => "load",
            Self::Defaults => "apply defaults",
            Self::Transform => "transform",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building a value through a
/// [`crate::Processor`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackfillError {
    /// The configured source failed to produce a value.
    #[error("load: {source}")]
    Acquisition {
        /// Error reported by the loader or provider.
        #[source]
        source: BoxError,
    },

    /// The processor was built without any source.
    #[error("load: no configuration source provided")]
    MissingSource,

    /// Default filling failed.
    #[error("apply defaults: {source}")]
    Defaults {
        /// Error reported by the merge engine.
        #[source]
        source: MergeError,
    },

    /// A fallible transformer rejected the merged value.
    #[error("transform: {source}")]
    Transform {
        /// Error reported by the transformer.
        #[source]
        source: BoxError,
    },

    /// The validator rejected the processed value.
    #[error("validate: {source}")]
    Validation {
        /// Error reported by the validator.
        #[source]
        source: BoxError,
    },
}
