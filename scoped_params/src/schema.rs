//! Parameter schemas.
//!
//! The engine treats parameter names as opaque strings. A [`Schema`] only
//! records which names exist; value shapes are the concern of the caller's
//! own types. Structs can describe their parameters with
//! `#[derive(Params)]`, which implements [`ParamSchema`].

use std::collections::BTreeSet;

/// Types that declare a closed set of parameter names.
///
/// # Examples
///
/// ```
/// use scoped_params::{ParamSchema, Params};
///
/// #[derive(Params)]
/// struct Movie {
///     title: String,
///     #[param(rename = "tagLine")]
///     tag_line: Option<String>,
/// }
///
/// assert_eq!(Movie::parameter_names(), ["title", "tagLine"]);
/// assert_eq!(Movie::TAG_LINE, "tagLine");
/// ```
pub trait ParamSchema {
    /// Every parameter name the type declares, in declaration order.
    fn parameter_names() -> &'static [&'static str];
}

/// The set of parameter names an engine accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    names: Option<BTreeSet<String>>,
}

impl Schema {
    /// A schema accepting any name.
    #[must_use]
    pub const fn open() -> Self {
        Self { names: None }
    }

    /// A closed schema declared by `S`.
    #[must_use]
    pub fn of<S: ParamSchema + ?Sized>() -> Self {
        Self::from_names(S::parameter_names().iter().copied())
    }

    /// A closed schema accepting exactly `names`.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns `true` when any name is accepted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.names.is_none()
    }

    /// Returns `true` when `name` is accepted.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.as_ref().is_none_or(|names| names.contains(name))
    }

    /// Declared names in sorted order, or `None` for an open schema.
    #[must_use]
    pub fn names(&self) -> Option<impl Iterator<Item = &str>> {
        self.names
            .as_ref()
            .map(|names| names.iter().map(String::as_str))
    }
}
