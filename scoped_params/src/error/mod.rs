//! Error types produced while resolving and evaluating parameters.

mod constructors;
mod snapshot;
mod types;

pub use snapshot::{FrameSummary, StackSnapshot};
pub use types::ParamError;
