//! Shared helpers for working with `figment::Jail` in tests.
//!
//! These utilities centralise the common pattern of initialising a jail,
//! running a closure that injects environment variables, and propagating the
//! closure's return value as an `anyhow::Result`.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Runs `f` in a jail whose environment holds exactly `vars`.
///
/// # Errors
///
/// Returns an error if the jail cannot be initialised.
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    with_jail(|j| {
        j.clear_env();
        for (key, value) in vars {
            j.set_env(key, value);
        }
        Ok(f())
    })
}
