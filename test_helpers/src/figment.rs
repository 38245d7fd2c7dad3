//! Helpers for running provider tests inside a `figment::Jail`.
//!
//! A jail gives each test its own working directory and environment, so
//! configuration files and `APP_*` variables created by one test never leak
//! into another.

use anyhow::{Result, anyhow};

/// Runs `f` inside a [`figment::Jail`] and returns whatever it produced.
///
/// # Examples
///
/// ```
/// use backfill_test_helpers::figment::with_jail;
///
/// let contents = with_jail(|jail| {
///     jail.create_file("app.toml", "port = 1")?;
///     Ok(std::fs::read_to_string("app.toml").unwrap_or_default())
/// })?;
/// assert_eq!(contents, "port = 1");
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error when the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// a jail boundary with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adaptor, which hands over ownership"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
