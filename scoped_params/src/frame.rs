//! Immutable parameter frames.
//!
//! A [`Frame`] binds parameter names to [`FrameEntry`] values. Frames are
//! built once at the call site of [`crate::with`], [`crate::wrap`] or
//! [`crate::wrap_with_defaults`] and never change afterwards; cloning a frame
//! shares its bindings.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{InheritedOp, Lazy, ParamError, ParamResult, ParamResultExt, default};

/// A single binding within a [`Frame`].
#[derive(Clone, Debug)]
pub enum FrameEntry {
    /// Overwrites whatever outer frames resolved for the parameter.
    Concrete(Lazy),
    /// Receives the value outer frames resolved and produces a new one.
    Inherited(InheritedOp),
}

impl From<Lazy> for FrameEntry {
    fn from(value: Lazy) -> Self {
        match value {
            Lazy::Inherited(op) => Self::Inherited(op),
            other => Self::Concrete(other),
        }
    }
}

impl From<InheritedOp> for FrameEntry {
    fn from(op: InheritedOp) -> Self {
        Self::Inherited(op)
    }
}

/// An immutable mapping from parameter name to [`FrameEntry`].
///
/// # Examples
///
/// ```
/// use scoped_params::{Frame, default, frame};
///
/// let built = Frame::builder()
///     .set("title", "Bridesmaids")
///     .set("tag_line", default(serde_json::Value::Null))
///     .build();
/// let via_macro = frame! {
///     "title" => "Bridesmaids",
///     "tag_line" => default(serde_json::Value::Null),
/// };
/// assert_eq!(built.names().collect::<Vec<_>>(), via_macro.names().collect::<Vec<_>>());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Frame {
    entries: Arc<IndexMap<String, FrameEntry>>,
}

impl Frame {
    /// An empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a frame.
    #[must_use]
    pub fn builder() -> FrameBuilder {
        FrameBuilder::default()
    }

    /// Build a frame from name/value pairs. Later duplicates win.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Lazy>,
    {
        entries
            .into_iter()
            .fold(Self::builder(), |builder, (name, value)| {
                builder.set(name, value)
            })
            .build()
    }

    /// Build a frame of literal bindings from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidFrame`] when `value` is not an object.
    pub fn from_value(value: Value) -> ParamResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_entries(map)),
            other => Err(ParamError::InvalidFrame {
                message: format!("expected an object of bindings, found {}", type_name(&other)),
            }
            .into()),
        }
    }

    /// Serialise `value` and bind each top-level field as a literal.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Deserialize`] when serialisation fails and
    /// [`ParamError::InvalidFrame`] when `value` does not serialise to an
    /// object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> ParamResult<Self> {
        let json = serde_json::to_value(value).into_param()?;
        Self::from_value(json)
    }

    /// The entry bound to `name`, if any.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&FrameEntry> {
        self.entries.get(name)
    }

    /// Returns `true` when the frame binds `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names in insertion order.
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the frame binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy of this frame where every concrete entry becomes a
    /// [`default`]. Inherited entries are kept unchanged.
    #[must_use]
    pub fn as_defaults(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| {
                let converted = match entry {
                    FrameEntry::Concrete(value) => FrameEntry::Inherited(default(value.clone())),
                    FrameEntry::Inherited(op) => FrameEntry::Inherited(op.clone()),
                };
                (name.clone(), converted)
            })
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}

/// Accumulates bindings before freezing them into a [`Frame`].
#[derive(Debug, Default)]
pub struct FrameBuilder {
    entries: IndexMap<String, FrameEntry>,
}

impl FrameBuilder {
    /// Bind `name` to `value`, replacing any earlier binding of the same name.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Lazy>) -> Self {
        self.entries.insert(name.into(), FrameEntry::from(value.into()));
        self
    }

    /// Freeze the bindings.
    #[must_use]
    pub fn build(self) -> Frame {
        Frame {
            entries: Arc::new(self.entries),
        }
    }
}

pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a [`Frame`] from `name => value` pairs.
///
/// Values may be anything convertible into [`Lazy`], including the
/// [`InheritedOp`]s returned by [`default`], [`crate::merge`] and
/// [`crate::template`].
///
/// ```
/// use scoped_params::{frame, merge, Lazy};
///
/// let f = frame! {
///     "genre" => "comedy",
///     "awards" => merge([Lazy::sequence(["bafta"])]),
/// };
/// assert_eq!(f.len(), 2);
/// ```
#[macro_export]
macro_rules! frame {
    () => {
        $crate::Frame::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Frame::builder()$(.set($name, $value))+.build()
    };
}
