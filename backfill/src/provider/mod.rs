//! Figment-backed acquisition source.
//!
//! [`FigmentProvider`] layers configuration files and environment variables
//! through `figment` and deserialises the result. It is the usual way to feed
//! a [`crate::Processor`] from disk; defaults are then filled by the engine
//! rather than by serde.

use std::fmt;
use std::marker::PhantomData;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::Env;
#[cfg(any(feature = "toml", feature = "json"))]
use figment::providers::Format;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{BoxError, ConfigProvider};


/// Failures raised while assembling or extracting a [`FigmentProvider`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The file extension names no format enabled in this build.
    #[error("unsupported configuration format for '{path}'")]
    UnsupportedFormat {
        /// Path whose extension was not recognised.
        path: Utf8PathBuf,
    },

    /// Figment could not produce the target type.
    #[error(transparent)]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ProviderError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// Loads `T` from layered figment providers.
///
/// Later layers override earlier ones. Missing files are skipped, so a
/// provider can name optional files freely.
///
/// # Examples
///
/// ```rust
/// use backfill::{Mergeable, Processor, provider::FigmentProvider};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, Mergeable)]
/// struct App {
///     #[serde(default)]
///     port: u16,
/// }
///
/// figment::Jail::expect_with(|jail| {
///     jail.set_env("APP_PORT", "7000");
///     let provider = FigmentProvider::<App>::new().with_env_prefix("APP_");
///     let app = Processor::from_provider(provider)
///         .with_default(App { port: 80 })
///         .build()
///         .map_err(|e| e.to_string())?;
///     assert_eq!(app.port, 7000);
///     Ok(())
/// });
/// ```
pub struct FigmentProvider<T> {
    figment: Figment,
    _target: PhantomData<fn() -> T>,
}

impl<T> FigmentProvider<T> {
    /// Creates a provider with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::from_figment(Figment::new())
    }

    /// Wraps an existing figment.
    #[must_use]
    pub const fn from_figment(figment: Figment) -> Self {
        Self {
            figment,
            _target: PhantomData,
        }
    }

    /// Adds a configuration file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnsupportedFormat`] when the extension is
    /// unknown or its format feature is disabled.
    pub fn with_file(self, path: impl AsRef<Utf8Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let extension = path.extension().map(str::to_ascii_lowercase);
        match extension.as_deref() {
            #[cfg(feature = "toml")]
            Some("toml") => Ok(self.merge(figment::providers::Toml::file(path))),
            #[cfg(feature = "json")]
            Some("json") => Ok(self.merge(figment::providers::Json::file(path))),
            _ => Err(ProviderError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Adds every file in `paths`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first path rejected by [`FigmentProvider::with_file`].
    pub fn with_files<I, P>(self, paths: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Utf8Path>,
    {
        paths
            .into_iter()
            .try_fold(self, |provider, path| provider.with_file(path))
    }

    /// Adds environment variables starting with `prefix`.
    ///
    /// The prefix is stripped and `__` separates nested keys, so
    /// `APP_DB__PORT` sets `db.port`.
    #[must_use]
    pub fn with_env_prefix(self, prefix: &str) -> Self {
        self.merge(Env::prefixed(prefix).split("__"))
    }

    /// Adds an arbitrary figment provider as the highest-priority layer.
    #[must_use]
    pub fn merge(mut self, provider: impl figment::Provider) -> Self {
        self.figment = self.figment.merge(provider);
        self
    }

    /// The underlying figment.
    #[must_use]
    pub const fn figment(&self) -> &Figment {
        &self.figment
    }
}

impl<T> Default for FigmentProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FigmentProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmentProvider")
            .field("target", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ConfigProvider<T> for FigmentProvider<T> {
    fn load(&self) -> Result<T, BoxError> {
        tracing::debug!(
            target_type = std::any::type_name::<T>(),
            "extracting configuration from figment"
        );
        self.figment
            .extract::<T>()
            .map_err(|err| BoxError::from(ProviderError::from(err)))
    }
}
