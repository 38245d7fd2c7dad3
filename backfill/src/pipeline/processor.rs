//! Builder-style pipeline orchestration.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use super::{ConfigProvider, Source};
use crate::{
    BackfillError, BackfillResult, BackfillResultExt, BoxError, DefaultRegistry, MergeOptions,
    Mergeable, apply_defaults_with,
};

type Transformer<T> = Box<dyn FnOnce(&mut T) -> Result<(), BoxError>>;
type Validator<T> = Box<dyn FnOnce(&T) -> Result<(), BoxError>>;

/// Loads a value, fills its defaults, then transforms and validates it.
///
/// # Examples
///
/// ```rust
/// use backfill::{Mergeable, Processor};
///
/// #[derive(Debug, Mergeable)]
/// struct Service {
///     name: String,
///     workers: u32,
/// }
///
/// let service = Processor::from_value(Service { name: "api".into(), workers: 0 })
///     .with_default(Service { name: String::new(), workers: 4 })
///     .with_transformer(|s| s.name = s.name.to_uppercase())
///     .with_validator(|s| {
///         if s.workers == 0 {
///             return Err("workers must be positive");
///         }
///         Ok(())
///     })
///     .build()?;
///
/// assert_eq!(service.name, "API");
/// assert_eq!(service.workers, 4);
/// # Ok::<(), std::sync::Arc<backfill::BackfillError>>(())
/// ```
pub struct Processor<T> {
    source: Option<Source<T>>,
    registry: DefaultRegistry,
    transformer: Option<Transformer<T>>,
    validator: Option<Validator<T>>,
    options: MergeOptions,
}

impl<T: Mergeable> Processor<T> {
    /// Creates a processor without a source.
    ///
    /// [`Processor::build`] fails with [`BackfillError::MissingSource`] until
    /// [`Processor::with_source`] supplies one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            registry: DefaultRegistry::new(),
            transformer: None,
            validator: None,
            options: MergeOptions::default(),
        }
    }

    /// Starts from a value the caller already holds.
    #[must_use]
    pub fn from_value(value: T) -> Self {
        Self::new().with_source(Source::Value(value))
    }

    /// Starts from a loader function called once during
    /// [`Processor::build`].
    #[must_use]
    pub fn from_loader<F, E>(loader: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        Self::new().with_source(Source::loader(loader))
    }

    /// Starts from a [`ConfigProvider`].
    #[must_use]
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: ConfigProvider<T> + 'static,
    {
        Self::new().with_source(Source::provider(provider))
    }

    /// Replaces the acquisition source.
    #[must_use]
    pub fn with_source(mut self, source: Source<T>) -> Self {
        self.source = Some(source);
        self
    }

    /// Registers one default. Later registrations take priority.
    #[must_use]
    pub fn with_default<D: Mergeable>(mut self, value: D) -> Self {
        self.registry.register(value);
        self
    }

    /// Appends every default held by `registry`.
    #[must_use]
    pub fn with_defaults(mut self, registry: DefaultRegistry) -> Self {
        self.registry.extend(registry);
        self
    }

    /// Sets a transformer run once after defaults are applied.
    ///
    /// Replaces any transformer set earlier.
    #[must_use]
    pub fn with_transformer<F>(mut self, transform: F) -> Self
    where
        F: FnOnce(&mut T) + 'static,
    {
        self.transformer = Some(Box::new(move |value: &mut T| {
            transform(value);
            Ok(())
        }));
        self
    }

    /// Sets a transformer that may reject the merged value.
    ///
    /// Replaces any transformer set earlier.
    #[must_use]
    pub fn with_fallible_transformer<F, E>(mut self, transform: F) -> Self
    where
        F: FnOnce(&mut T) -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.transformer = Some(Box::new(move |value: &mut T| {
            transform(value).map_err(Into::into)
        }));
        self
    }

    /// Sets the validator run last. Replaces any validator set earlier.
    #[must_use]
    pub fn with_validator<F, E>(mut self, validate: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.validator = Some(Box::new(move |value: &T| {
            validate(value).map_err(Into::into)
        }));
        self
    }

    /// Overrides the merge depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options = self.options.with_max_depth(max_depth);
        self
    }

    /// Replaces all merge options.
    #[must_use]
    pub const fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Defaults registered so far.
    #[must_use]
    pub const fn registry(&self) -> &DefaultRegistry {
        &self.registry
    }

    /// Runs the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first failure, tagged with its stage:
    /// [`BackfillError::MissingSource`] or [`BackfillError::Acquisition`],
    /// [`BackfillError::Defaults`], [`BackfillError::Transform`], or
    /// [`BackfillError::Validation`].
    pub fn build(self) -> BackfillResult<T> {
        let target = type_name::<T>();
        let source = self
            .source
            .ok_or_else(|| Arc::new(BackfillError::MissingSource))?;

        tracing::debug!(target_type = target, source = source.describe(), "acquiring value");
        let mut value = source.acquire()?;

        apply_defaults_with(&mut value, &self.registry, self.options).into_backfill()?;

        if let Some(transform) = self.transformer {
            tracing::debug!(target_type = target, "running transformer");
            transform(&mut value)
                .map_err(BackfillError::transform)
                .into_backfill()?;
        }

        if let Some(validate) = self.validator {
            tracing::debug!(target_type = target, "running validator");
            validate(&value).map_err(BackfillError::validation_arc)?;
        }

        Ok(value)
    }
}

impl<T: Mergeable> Default for Processor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Processor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("source", &self.source)
            .field("registry", &self.registry)
            .field("has_transformer", &self.transformer.is_some())
            .field("has_validator", &self.validator.is_some())
            .field("options", &self.options)
            .finish()
    }
}
