//! Forcing deferred trees into concrete data.
//!
//! Evaluation is all-or-nothing: the first failure aborts the whole call and
//! no partial output escapes. Cyclic references are not detected as such;
//! they run until the engine's depth limit turns them into
//! [`crate::ParamError::DepthExceeded`].

use serde_json::{Map, Value};

use crate::{Lazy, ParamResult, Scope};

/// Peel thunks and inherited operators until a literal or container remains.
///
/// Containers are returned without forcing their children. Inherited
/// operators are invoked with no inherited value.
///
/// # Errors
///
/// Propagates any failure raised by a forced computation.
pub fn force(scope: &Scope, lazy: &Lazy) -> ParamResult<Lazy> {
    let mut current = lazy.clone();
    let mut scope = scope.clone();
    loop {
        let next = match &current {
            Lazy::Thunk(thunk) => {
                scope = scope.descend()?;
                thunk.call(&scope)?
            }
            Lazy::Inherited(op) => {
                scope = scope.descend()?;
                op.call(&scope, None)?
            }
            Lazy::Literal(_) | Lazy::Sequence(_) | Lazy::Mapping(_) => break,
        };
        current = next;
    }
    Ok(current)
}

/// Recursively force `lazy` into concrete data.
///
/// Sequences keep their order and duplicates, mappings keep their keys and
/// insertion order, and literals (including `null`) are returned unchanged.
///
/// # Errors
///
/// Propagates any failure raised while forcing the tree.
pub fn evaluate(scope: &Scope, lazy: &Lazy) -> ParamResult<Value> {
    match lazy {
        Lazy::Literal(value) => Ok(value.clone()),
        Lazy::Thunk(thunk) => {
            let inner = scope.descend()?;
            let next = thunk.call(&inner)?;
            evaluate(&inner, &next)
        }
        Lazy::Inherited(op) => {
            let inner = scope.descend()?;
            let next = op.call(&inner, None)?;
            evaluate(&inner, &next)
        }
        Lazy::Sequence(items) => items
            .iter()
            .map(|item| evaluate(scope, item))
            .collect::<ParamResult<Vec<_>>>()
            .map(Value::Array),
        Lazy::Mapping(entries) => entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), evaluate(scope, item)?)))
            .collect::<ParamResult<Map<String, Value>>>()
            .map(Value::Object),
    }
}
