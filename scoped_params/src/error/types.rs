//! Primary error enum for resolution and evaluation flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::StackSnapshot;

/// Errors that can occur while resolving or evaluating a parameter tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParamError {
    /// A parameter was read while no frame was active.
    #[error("parameter '{name}' was read outside any active scope")]
    EmptyScope {
        /// Parameter that was looked up.
        name: String,
    },

    /// A required parameter was not bound by any active frame.
    #[error("missing required parameter '{name}'; active frames: {stack}")]
    MissingParameter {
        /// Parameter that could not be resolved.
        name: String,
        /// The frames that were active when the lookup failed.
        stack: StackSnapshot,
    },

    /// `merge` was asked to combine values that are not text, sequences or
    /// mappings.
    #[error("cannot merge values of type {type_name}")]
    UnsupportedMergeType {
        /// JSON type name of the offending element.
        type_name: &'static str,
    },

    /// A name outside the engine's closed schema was bound or looked up.
    #[error("parameter '{name}' is not declared by the schema")]
    UnknownParameter {
        /// Undeclared parameter name.
        name: String,
    },

    /// Forcing nested deferred values exceeded the configured depth.
    ///
    /// Cyclic parameter references surface as this error.
    #[error("evaluation exceeded the maximum depth of {limit} nested forces")]
    DepthExceeded {
        /// Configured depth limit.
        limit: usize,
    },

    /// A template pattern contained unbalanced or malformed braces.
    #[error("invalid template '{pattern}': {message}")]
    TemplateSyntax {
        /// Pattern that failed to parse.
        pattern: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A frame could not be built from the supplied data.
    #[error("invalid frame: {message}")]
    InvalidFrame {
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A computed value reported a failure of its own.
    #[error("computation of '{key}' failed: {message}")]
    Computation {
        /// Field or parameter the computation was producing.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Evaluated output could not be converted into the requested type.
    #[error("failed to convert evaluated output: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Engine options could not be extracted from their providers.
    #[error("failed to load engine options: {0}")]
    Options(#[from] Box<FigmentError>),
}
