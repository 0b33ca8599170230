//! Constructors for `ParamError`.

use figment::Error as FigmentError;

use super::ParamError;

impl ParamError {
    /// Construct a computation error for user-supplied thunks.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_params::ParamError;
    /// let e = ParamError::computation("id", "title is empty");
    /// assert!(matches!(e, ParamError::Computation { .. }));
    /// assert_eq!(e.to_string(), "computation of 'id' failed: title is empty");
    /// ```
    #[must_use]
    pub fn computation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Computation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct an options error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_params::ParamError;
    /// let e = ParamError::options(figment::Error::from("boom"));
    /// assert!(matches!(e, ParamError::Options(_)));
    /// ```
    #[must_use]
    pub fn options(source: FigmentError) -> Self {
        Self::Options(Box::new(source))
    }

    /// Returns `true` when the error originates from a parameter lookup
    /// (missing, unknown, or out of scope).
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyScope { .. } | Self::MissingParameter { .. } | Self::UnknownParameter { .. }
        )
    }
}
