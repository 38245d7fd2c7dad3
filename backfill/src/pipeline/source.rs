//! Acquisition sources for the processing pipeline.

use std::fmt;

use crate::{BackfillError, BackfillResult, BoxError};

/// Produces the value a [`crate::Processor`] starts from.
///
/// Implement this for anything that can load a configuration on demand, such
/// as a file reader or a remote fetcher. [`crate::provider::FigmentProvider`]
/// is the bundled implementation.
///
/// # Examples
///
/// ```rust
/// use backfill::{BoxError, ConfigProvider};
///
/// struct Fixed(u16);
///
/// impl ConfigProvider<u16> for Fixed {
///     fn load(&self) -> Result<u16, BoxError> {
///         Ok(self.0)
///     }
/// }
///
/// assert_eq!(Fixed(8080).load().ok(), Some(8080));
/// ```
pub trait ConfigProvider<T> {
    /// Loads a fresh value.
    ///
    /// # Errors
    ///
    /// Returns the provider's own failure; the pipeline wraps it as
    /// [`BackfillError::Acquisition`].
    fn load(&self) -> Result<T, BoxError>;
}

impl<T, P> ConfigProvider<T> for Box<P>
where
    P: ConfigProvider<T> + ?Sized,
{
    fn load(&self) -> Result<T, BoxError> {
        (**self).load()
    }
}

impl<T, P> ConfigProvider<T> for &P
where
    P: ConfigProvider<T> + ?Sized,
{
    fn load(&self) -> Result<T, BoxError> {
        (**self).load()
    }
}

/// The single place a [`crate::Processor`] obtains its root value from.
pub enum Source<T> {
    /// A value the caller already holds.
    Value(T),
    /// A zero-argument function called once.
    Loader(Box<dyn FnOnce() -> Result<T, BoxError>>),
    /// An object implementing [`ConfigProvider`].
    Provider(Box<dyn ConfigProvider<T>>),
}

impl<T> Source<T> {
    /// Wraps a fallible loader function.
    pub fn loader<F, E>(loader: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'static,
        E: Into<BoxError>,
    {
        Self::Loader(Box::new(move || loader().map_err(Into::into)))
    }

    /// Wraps a provider.
    pub fn provider<P>(provider: P) -> Self
    where
        P: ConfigProvider<T> + 'static,
    {
        Self::Provider(Box::new(provider))
    }

    /// Short label naming the kind of source, used in logs.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Loader(_) => "loader",
            Self::Provider(_) => "provider",
        }
    }

    /// Obtains the value, consuming the source.
    ///
    /// # Errors
    ///
    /// Returns [`BackfillError::Acquisition`] wrapping the loader's or
    /// provider's failure.
    pub fn acquire(self) -> BackfillResult<T> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Loader(loader) => loader().map_err(BackfillError::acquisition_arc),
            Self::Provider(provider) => provider.load().map_err(BackfillError::acquisition_arc),
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Source").field(&self.describe()).finish()
    }
}
