//! Extensions for mapping errors to `ParamResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ParamError::…(e)))`
//! patterns when converting external error types into the crate's
//! `ParamResult<T>` alias (`Result<T, Arc<ParamError>>`).
//!
//! # Examples
//!
//! ```
//! use scoped_params::{ParamResult, ParamResultExt};
//!
//! fn parse() -> ParamResult<u16> {
//!     // serde_json::Error implements Into<ParamError>
//!     serde_json::from_str("8080").into_param()
//! }
//! # assert_eq!(parse().ok(), Some(8080));
//! ```

use std::sync::Arc;

use crate::{ParamError, ParamResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ParamError>`
/// into a `ParamResult<T>`.
pub trait ParamResultExt<T, E> {
    /// Convert `Result<T, E>` into `ParamResult<T>` using `Into<ParamError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ParamError>`.
    fn into_param(self) -> ParamResult<T>;
}

impl<T, E> ParamResultExt<T, E> for Result<T, E>
where
    E: Into<ParamError>,
{
    fn into_param(self) -> ParamResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension tailored to mapping `figment::Error` into an options failure.
pub trait ParamOptionsExt<T> {
    /// Convert `Result<T, figment::Error>` into `ParamResult<T>` as a
    /// [`ParamError::Options`].
    ///
    /// # Errors
    ///
    /// Returns a `ParamError::Options` wrapped in `Arc` when the input is `Err`.
    fn into_param_options(self) -> ParamResult<T>;
}

impl<T> ParamOptionsExt<T> for Result<T, figment::Error> {
    fn into_param_options(self) -> ParamResult<T> {
        self.map_err(|e| Arc::new(ParamError::options(e)))
    }
}
