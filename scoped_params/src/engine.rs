//! The evaluation entry point.
//!
//! An [`Engine`] owns the schema and options shared by every scope it hands
//! out. Engines are cheap to clone and can be shared across threads; each
//! evaluation builds its own [`Scope`] so concurrent evaluations never
//! observe one another's frames.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    EngineOptions, Frame, Lazy, ParamResult, ParamResultExt, ParamSchema, Schema, Scope,
};

#[derive(Debug, Default)]
pub(crate) struct EngineContext {
    pub(crate) schema: Schema,
    pub(crate) options: EngineOptions,
}

/// Evaluates parameterised trees.
///
/// Every thunk or inherited operator forced during one evaluation counts
/// towards [`EngineOptions::max_depth`] (default
/// [`crate::DEFAULT_MAX_DEPTH`], overridable through
/// `SCOPED_PARAMS_MAX_DEPTH`). Exceeding it fails with
/// [`crate::ParamError::DepthExceeded`]. This stops cyclic references, but it
/// also rejects acyclic trees whose lookups nest deeper than the limit; raise
/// `max_depth` for those.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, Lazy, frame, get};
///
/// let engine = Engine::new();
/// let tree = Lazy::mapping([("title", get("title"))]);
/// let out = engine.evaluate_in(&frame! { "title" => "Heat" }, &tree)?;
/// assert_eq!(out, serde_json::json!({"title": "Heat"}));
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    context: Arc<EngineContext>,
}

impl Engine {
    /// An engine with an open schema and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine accepting only the names declared by `S`.
    #[must_use]
    pub fn with_schema<S: ParamSchema + ?Sized>() -> Self {
        Self::builder().schema(Schema::of::<S>()).build()
    }

    /// Start configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The schema checked when frames are pushed.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.context.schema
    }

    /// The options in force.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.context.options
    }

    /// A fresh scope with no active frames.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::root(Arc::clone(&self.context))
    }

    /// Evaluate `tree` starting from an empty scope.
    ///
    /// # Errors
    ///
    /// Propagates the first failure raised while forcing the tree.
    pub fn evaluate(&self, tree: &Lazy) -> ParamResult<Value> {
        self.scope().evaluate(tree)
    }

    /// Evaluate `tree` with `frame` as the outermost frame.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::UnknownParameter`] when `frame` binds an
    /// undeclared name, otherwise propagates the first evaluation failure.
    pub fn evaluate_in(&self, frame: &Frame, tree: &Lazy) -> ParamResult<Value> {
        self.scope().push(frame)?.evaluate(tree)
    }

    /// Evaluate `tree` within `frame` and deserialise the result into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Deserialize`] when the evaluated data does
    /// not fit `T`, otherwise propagates the first evaluation failure.
    pub fn evaluate_into<T: DeserializeOwned>(&self, frame: &Frame, tree: &Lazy) -> ParamResult<T> {
        let value = self.evaluate_in(frame, tree)?;
        serde_json::from_value(value).into_param()
    }

    /// Resolve and evaluate a single parameter with `frame` active.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::MissingParameter`] when nothing sets the
    /// parameter, otherwise propagates the first evaluation failure.
    pub fn get_evaluated(&self, frame: &Frame, name: &str) -> ParamResult<Value> {
        self.scope().push(frame)?.get_evaluated(name)
    }
}

/// Builder for [`Engine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    schema: Schema,
    options: EngineOptions,
}

impl EngineBuilder {
    /// Replace the schema.
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Finish the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        debug!(
            open_schema = self.schema.is_open(),
            max_depth = self.options.max_depth,
            "built parameter engine"
        );
        Engine {
            context: Arc::new(EngineContext {
                schema: self.schema,
                options: self.options,
            }),
        }
    }
}
