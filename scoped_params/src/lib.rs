//! Dynamically scoped, lazily evaluated parameters.
//!
//! Configuration trees are built from [`Lazy`] values whose leaves may refer
//! to named parameters with [`get`]. Parameters are supplied by [`Frame`]s
//! activated with [`with`], or by reusable templates created with [`wrap`]
//! and [`wrap_with_defaults`]. Nothing is resolved until an [`Engine`]
//! evaluates the tree, at which point every reference reads the innermost
//! frame active where it is forced.
//!
//! Frames may also carry inherited operators ([`default`], [`merge`],
//! [`template`]) that combine the value set by outer frames instead of
//! replacing it.
//!
//! ```
//! use scoped_params::{Engine, Lazy, frame, get, merge, with};
//! use serde_json::json;
//!
//! let tree = with(
//!     frame! { "awards" => merge([Lazy::sequence(["bafta"])]) },
//!     Lazy::mapping([("title", get("title")), ("awards", get("awards"))]),
//! );
//! let out = Engine::new().evaluate_in(
//!     &frame! { "title" => "Heat", "awards" => json!(["oscar"]) },
//!     &tree,
//! )?;
//! assert_eq!(out, json!({"title": "Heat", "awards": ["oscar", "bafta"]}));
//! # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
//! ```

use std::sync::Arc;

pub use scoped_params_macros::Params;

mod combinators;
mod engine;
mod error;
mod eval;
mod frame;
mod options;
mod resolve;
mod result_ext;
mod schema;
mod scope;
mod value;

pub use combinators::{
    Template, TemplateRef, Wrapped, merge, merge_values, objectify, objectify_names, template,
    template_str, with, wrap, wrap_with_defaults,
};
pub use engine::{Engine, EngineBuilder};
pub use error::{FrameSummary, ParamError, StackSnapshot};
pub use eval::{evaluate, force};
pub use frame::{Frame, FrameBuilder, FrameEntry};
pub use options::{DEFAULT_MAX_DEPTH, ENV_PREFIX, EngineOptions};
pub use resolve::{Requirement, default, get, get_optional};
pub use result_ext::{ParamOptionsExt, ParamResultExt};
pub use schema::{ParamSchema, Schema};
pub use scope::Scope;
pub use value::{InheritedOp, Lazy, Thunk};

/// Result type used throughout the crate.
///
/// Errors are shared so a single failure can be reported from several nested
/// evaluations without cloning.
pub type ParamResult<T> = Result<T, Arc<ParamError>>;
