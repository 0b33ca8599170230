//! Type-directed combination of values.

use serde_json::{Map, Value};

use crate::frame::type_name;
use crate::{InheritedOp, Lazy, ParamError, ParamResult, evaluate};

/// An inherited operator that appends `items` to whatever an outer frame
/// resolved for the same parameter.
///
/// When forced, every item is evaluated and the inherited value, if any, is
/// placed in front. The combined list is then handed to [`merge_values`].
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, Lazy, frame, get, merge, with};
///
/// let tree = with(frame! { "awards" => merge([Lazy::sequence(["bafta"])]) }, get("awards"));
/// let out = Engine::new().evaluate_in(&frame! { "awards" => Lazy::sequence(["oscar"]) }, &tree)?;
/// assert_eq!(out, serde_json::json!(["oscar", "bafta"]));
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn merge<I, V>(items: I) -> InheritedOp
where
    I: IntoIterator<Item = V>,
    V: Into<Lazy>,
{
    let parts: Vec<Lazy> = items.into_iter().map(Into::into).collect();
    InheritedOp::new(move |scope, inherited| {
        let mut values = Vec::with_capacity(parts.len() + 1);
        values.extend(inherited);
        for item in &parts {
            values.push(evaluate(scope, item)?);
        }
        merge_values(values).map(Lazy::Literal)
    })
}

/// Combine concrete values according to the type of the first one.
///
/// - strings are concatenated without a separator;
/// - arrays are flattened one level, keeping order and duplicates;
/// - objects are unioned, later entries winning on key collision;
/// - an empty list yields `null`.
///
/// # Errors
///
/// Returns [`ParamError::UnsupportedMergeType`] when the first value is not a
/// string, array or object, or when a later value does not match its kind.
///
/// # Examples
///
/// ```
/// use scoped_params::merge_values;
/// use serde_json::json;
///
/// assert_eq!(merge_values(vec![json!("z"), json!("a"), json!("b")])?, json!("zab"));
/// assert_eq!(
///     merge_values(vec![json!({"a": 1, "b": 1}), json!({"b": 2})])?,
///     json!({"a": 1, "b": 2}),
/// );
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
pub fn merge_values(values: Vec<Value>) -> ParamResult<Value> {
    let strategy = match values.first() {
        None => return Ok(Value::Null),
        Some(Value::String(_)) => Strategy::Concatenate,
        Some(Value::Array(_)) => Strategy::Flatten,
        Some(Value::Object(_)) => Strategy::Union,
        Some(other) => return Err(unsupported(other)),
    };
    match strategy {
        Strategy::Concatenate => concat_text(values),
        Strategy::Flatten => concat_sequences(values),
        Strategy::Union => union_mappings(values),
    }
}

enum Strategy {
    Concatenate,
    Flatten,
    Union,
}

fn unsupported(value: &Value) -> std::sync::Arc<ParamError> {
    ParamError::UnsupportedMergeType {
        type_name: type_name(value),
    }
    .into()
}

fn concat_text(values: Vec<Value>) -> ParamResult<Value> {
    let mut out = String::new();
    for value in values {
        match value {
            Value::String(text) => out.push_str(&text),
            other => return Err(unsupported(&other)),
        }
    }
    Ok(Value::String(out))
}

fn concat_sequences(values: Vec<Value>) -> ParamResult<Value> {
    let mut out = Vec::new();
    for value in values {
        match value {
            Value::Array(items) => out.extend(items),
            other => return Err(unsupported(&other)),
        }
    }
    Ok(Value::Array(out))
}

fn union_mappings(values: Vec<Value>) -> ParamResult<Value> {
    let mut out = Map::new();
    for value in values {
        match value {
            Value::Object(entries) => out.extend(entries),
            other => return Err(unsupported(&other)),
        }
    }
    Ok(Value::Object(out))
}
