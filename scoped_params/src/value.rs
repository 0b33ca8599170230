//! The deferred value model.
//!
//! A [`Lazy`] tree describes configuration data whose leaves may still be
//! waiting on parameters. Nothing is forced while a tree is being built, so a
//! tree may refer to parameters whose frames only appear later in the
//! surrounding object graph. [`crate::evaluate`] turns a tree into ordinary
//! [`serde_json::Value`] data.
//!
//! Zero-argument computations ([`Thunk`]) and computations that receive the
//! previously resolved value ([`InheritedOp`]) are distinct variants chosen at
//! construction time.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{ParamResult, ParamResultExt, Scope};

type ThunkFn = dyn Fn(&Scope) -> ParamResult<Lazy> + Send + Sync;
type InheritedFn = dyn Fn(&Scope, Option<Value>) -> ParamResult<Lazy> + Send + Sync;

/// A zero-argument deferred computation.
#[derive(Clone)]
pub struct Thunk(Arc<ThunkFn>);

impl Thunk {
    /// Wrap a closure that produces a value when forced.
    ///
    /// The closure receives the scope active at the point it is forced.
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Scope) -> ParamResult<Lazy> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, scope: &Scope) -> ParamResult<Lazy> {
        (self.0)(scope)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// A one-argument deferred computation that receives the value resolved so
/// far for the same parameter, or `None` when nothing has been set yet.
#[derive(Clone)]
pub struct InheritedOp(Arc<InheritedFn>);

impl InheritedOp {
    /// Wrap a closure that transforms an inherited value.
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Scope, Option<Value>) -> ParamResult<Lazy> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, scope: &Scope, inherited: Option<Value>) -> ParamResult<Lazy> {
        (self.0)(scope, inherited)
    }
}

impl fmt::Debug for InheritedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InheritedOp(..)")
    }
}

/// A possibly deferred piece of configuration data.
#[derive(Clone, Debug)]
pub enum Lazy {
    /// Concrete data, including `null`.
    Literal(Value),
    /// A computation forced with no input.
    Thunk(Thunk),
    /// A computation forced with the inherited value of its parameter.
    Inherited(InheritedOp),
    /// An ordered list of deferred values.
    Sequence(Vec<Lazy>),
    /// An insertion-ordered map of deferred values.
    Mapping(IndexMap<String, Lazy>),
}

impl Lazy {
    /// The `null` literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Value::Null)
    }

    /// Wrap concrete data.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Build a sequence from anything convertible into [`Lazy`].
    #[must_use]
    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping from key/value pairs. Later duplicates replace earlier
    /// values but keep the first key position.
    #[must_use]
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// A computed field: a thunk whose closure yields concrete data.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_params::{Engine, Lazy, frame};
    ///
    /// let shout = Lazy::computed(|scope| {
    ///     let name = scope.get_evaluated("name")?;
    ///     Ok(name.as_str().unwrap_or_default().to_uppercase().into())
    /// });
    /// let out = Engine::new().evaluate_in(&frame! { "name" => "ada" }, &shout)?;
    /// assert_eq!(out, "ADA");
    /// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
    /// ```
    #[must_use]
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Scope) -> ParamResult<Value> + Send + Sync + 'static,
    {
        Self::Thunk(Thunk::new(move |scope| f(scope).map(Self::Literal)))
    }

    /// Serialise `value` into a literal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Deserialize`] when serialisation fails.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> ParamResult<Self> {
        serde_json::to_value(value).map(Self::Literal).into_param()
    }

    /// Returns `true` when the tree contains no thunks or inherited ops.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Thunk(_) | Self::Inherited(_) => false,
            Self::Sequence(items) => items.iter().all(Self::is_concrete),
            Self::Mapping(entries) => entries.values().all(Self::is_concrete),
        }
    }
}

impl From<Value> for Lazy {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Lazy {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for Lazy {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for Lazy {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for Lazy {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<u64> for Lazy {
    fn from(value: u64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for Lazy {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<Vec<Self>> for Lazy {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

impl From<IndexMap<String, Self>> for Lazy {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Mapping(entries)
    }
}

impl From<Thunk> for Lazy {
    fn from(thunk: Thunk) -> Self {
        Self::Thunk(thunk)
    }
}

impl From<InheritedOp> for Lazy {
    fn from(op: InheritedOp) -> Self {
        Self::Inherited(op)
    }
}
