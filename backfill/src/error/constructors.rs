//! Constructors and classification helpers for [`BackfillError`].

use std::sync::Arc;

use super::{BackfillError, BoxError, MergeError, Stage};

impl BackfillError {
    /// Wrap a source failure as an acquisition error.
    pub fn acquisition(source: impl Into<BoxError>) -> Self {
        Self::Acquisition {
            source: source.into(),
        }
    }

    /// Wrap a transformer failure.
    pub fn transform(source: impl Into<BoxError>) -> Self {
        Self::Transform {
            source: source.into(),
        }
    }

    /// Wrap a validator failure.
    pub fn validation(source: impl Into<BoxError>) -> Self {
        Self::Validation {
            source: source.into(),
        }
    }

    /// Construct an acquisition error wrapped in an [`Arc`].
    #[must_use]
    pub fn acquisition_arc(source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::acquisition(source))
    }

    /// Construct a validation error wrapped in an [`Arc`].
    #[must_use]
    pub fn validation_arc(source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::validation(source))
    }

    /// Returns the pipeline stage that produced this error.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Acquisition { .. } | Self::MissingSource => Stage::Acquire,
            Self::Defaults { .. } => Stage::Defaults,
            Self::Transform { .. } => Stage::Transform,
            Self::Validation { .. } => Stage::Validate,
        }
    }

    /// Returns the merge engine error when default filling failed.
    #[must_use]
    pub const fn merge_error(&self) -> Option<&MergeError> {
        match self {
            Self::Defaults { source } => Some(source),
            _ => None,
        }
    }
}

impl From<MergeError> for BackfillError {
    fn from(source: MergeError) -> Self {
        Self::Defaults { source }
    }
}
