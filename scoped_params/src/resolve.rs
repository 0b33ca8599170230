//! Parameter resolution.
//!
//! Resolving a name folds every active frame that binds it, outermost first.
//! A concrete entry overwrites whatever was accumulated; an inherited entry
//! receives the fully evaluated accumulation (or `None`) and replaces it with
//! its own result. The last concrete write therefore wins, while inherited
//! operators placed after it may still extend or transform it.

use serde_json::Value;
use tracing::{debug, trace};

use crate::{FrameEntry, InheritedOp, Lazy, ParamError, ParamResult, Scope, Thunk, evaluate};

/// Whether an unset parameter is an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    /// Fail with [`ParamError::MissingParameter`] when unset.
    Required,
    /// Resolve to `None` when unset.
    Optional,
}

impl Scope {
    /// Fold the active frames into the value bound to `name`.
    ///
    /// The returned value is not forced; use [`Scope::get_evaluated`] when
    /// concrete data is needed.
    ///
    /// # Errors
    ///
    /// - [`ParamError::EmptyScope`] when no frame is active.
    /// - [`ParamError::UnknownParameter`] when a closed schema rejects `name`.
    /// - [`ParamError::MissingParameter`] when `name` is required and unset.
    /// - Any error raised while forcing inherited operators.
    pub fn resolve(&self, name: &str, requirement: Requirement) -> ParamResult<Option<Lazy>> {
        if self.is_empty() {
            return Err(ParamError::EmptyScope {
                name: name.to_owned(),
            }
            .into());
        }
        self.check_declared(name)?;

        let mut value: Option<Lazy> = None;
        for frame in self.frames() {
            let Some(entry) = frame.entry(name) else {
                continue;
            };
            value = Some(match entry {
                FrameEntry::Concrete(lazy) => lazy.clone(),
                FrameEntry::Inherited(op) => {
                    let inherited = value
                        .as_ref()
                        .map(|prior| evaluate(self, prior))
                        .transpose()?;
                    trace!(name, has_inherited = inherited.is_some(), "applying inherited op");
                    op.call(&self.descend()?, inherited)?
                }
            });
        }

        if value.is_none() && requirement == Requirement::Required {
            debug!(name, "required parameter is unset");
            return Err(ParamError::MissingParameter {
                name: name.to_owned(),
                stack: self.snapshot(),
            }
            .into());
        }
        Ok(value)
    }

    /// Resolve `name` and fully evaluate the result.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Scope::resolve`] for a required parameter and
    /// any failure raised while evaluating the resolved value.
    pub fn get_evaluated(&self, name: &str) -> ParamResult<Value> {
        let resolved = self
            .resolve(name, Requirement::Required)?
            .unwrap_or_else(Lazy::null);
        evaluate(self, &resolved)
    }
}

/// A deferred lookup of a required parameter.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, frame, get};
///
/// let out = Engine::new().evaluate_in(&frame! { "genre" => "comedy" }, &get("genre"))?;
/// assert_eq!(out, "comedy");
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn get(name: impl Into<String>) -> Lazy {
    lookup(name.into(), Requirement::Required)
}

/// A deferred lookup that forces to `null` when the parameter is unset.
#[must_use]
pub fn get_optional(name: impl Into<String>) -> Lazy {
    lookup(name.into(), Requirement::Optional)
}

fn lookup(name: String, requirement: Requirement) -> Lazy {
    Lazy::Thunk(Thunk::new(move |scope| {
        Ok(scope.resolve(&name, requirement)?.unwrap_or_else(Lazy::null))
    }))
}

/// An inherited operator yielding `value` only when nothing has been set
/// by an outer frame.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, default, frame, get, with};
///
/// let tree = with(frame! { "x" => default(2_i64) }, get("x"));
/// let out = Engine::new().evaluate_in(&frame! { "x" => default(1_i64) }, &tree)?;
/// assert_eq!(out, 1);
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn default(value: impl Into<Lazy>) -> InheritedOp {
    let fallback = value.into();
    InheritedOp::new(move |_, inherited| {
        Ok(inherited.map_or_else(|| fallback.clone(), Lazy::Literal))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::Requirement;
    use crate::{
        Engine, InheritedOp, Lazy, ParamError, Scope, Schema, default, frame, get, get_optional,
    };

    #[fixture]
    fn engine() -> Engine {
        Engine::new()
    }

    fn scope_with(engine: &Engine, frames: &[crate::Frame]) -> Scope {
        frames
            .iter()
            .try_fold(engine.scope(), |scope, f| scope.push(f))
            .expect("frames push")
    }

    fn append(suffix: &'static str) -> InheritedOp {
        InheritedOp::new(move |_, inherited| {
            let prior = inherited
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or("<unset>")
                .to_owned();
            Ok(Lazy::from(format!("{prior}{suffix}")))
        })
    }

    #[rstest]
    fn empty_stack_is_a_scope_error(engine: Engine) {
        let err = engine
            .scope()
            .resolve("title", Requirement::Required)
            .expect_err("empty stack");
        assert!(matches!(&*err, ParamError::EmptyScope { name } if name == "title"));
    }

    #[rstest]
    fn empty_stack_fails_even_for_optional_lookups(engine: Engine) {
        let err = engine
            .scope()
            .resolve("title", Requirement::Optional)
            .expect_err("empty stack");
        assert!(matches!(&*err, ParamError::EmptyScope { .. }));
    }

    #[rstest]
    #[case::single(vec![json!(1)], json!(1))]
    #[case::innermost_wins(vec![json!(1), json!(2), json!(3)], json!(3))]
    #[case::null_overwrites(vec![json!("a"), Value::Null], Value::Null)]
    fn last_concrete_write_wins(engine: Engine, #[case] writes: Vec<Value>, #[case] expected: Value) {
        let frames: Vec<_> = writes.into_iter().map(|v| frame! { "x" => v }).collect();
        let scope = scope_with(&engine, &frames);
        assert_eq!(scope.get_evaluated("x").expect("resolves"), expected);
    }

    #[rstest]
    fn frames_without_the_name_are_skipped(engine: Engine) {
        let scope = scope_with(
            &engine,
            &[frame! { "x" => 1_i64 }, frame! { "y" => 2_i64 }],
        );
        assert_eq!(scope.get_evaluated("x").expect("resolves"), json!(1));
    }

    #[rstest]
    fn missing_parameter_carries_name_and_stack(engine: Engine) {
        let scope = scope_with(&engine, &[frame! { "genre" => "comedy" }]);
        let err = scope.get_evaluated("title").expect_err("unset");
        match &*err {
            ParamError::MissingParameter { name, stack } => {
                assert_eq!(name, "title");
                assert_eq!(stack.len(), 1);
                assert_eq!(stack.to_string(), "{genre}");
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[rstest]
    fn optional_lookup_returns_none_or_null(engine: Engine) {
        let scope = scope_with(&engine, &[frame! { "genre" => "comedy" }]);
        assert!(
            scope
                .resolve("title", Requirement::Optional)
                .expect("optional")
                .is_none()
        );
        assert_eq!(
            scope.evaluate(&get_optional("title")).expect("forces"),
            Value::Null
        );
    }

    #[rstest]
    fn inherited_ops_fold_left(engine: Engine) {
        let scope = scope_with(
            &engine,
            &[
                frame! { "x" => append("a") },
                frame! { "x" => append("b") },
                frame! { "x" => append("c") },
            ],
        );
        assert_eq!(scope.get_evaluated("x").expect("folds"), json!("<unset>abc"));
    }

    #[rstest]
    fn concrete_write_discards_prior_accumulation(engine: Engine) {
        let scope = scope_with(
            &engine,
            &[
                frame! { "x" => append("a") },
                frame! { "x" => "reset" },
                frame! { "x" => append("!") },
            ],
        );
        assert_eq!(scope.get_evaluated("x").expect("folds"), json!("reset!"));
    }

    #[rstest]
    fn default_applies_only_when_unset(engine: Engine) {
        let unset = scope_with(&engine, &[frame! { "x" => default(1_i64) }]);
        assert_eq!(unset.get_evaluated("x").expect("default"), json!(1));

        let overridden = scope_with(
            &engine,
            &[frame! { "x" => default(1_i64) }, frame! { "x" => 5_i64 }],
        );
        assert_eq!(overridden.get_evaluated("x").expect("override"), json!(5));

        let preset = scope_with(
            &engine,
            &[frame! { "x" => 5_i64 }, frame! { "x" => default(1_i64) }],
        );
        assert_eq!(preset.get_evaluated("x").expect("keeps preset"), json!(5));
    }

    #[rstest]
    fn outer_default_beats_inner_default(engine: Engine) {
        let scope = scope_with(
            &engine,
            &[frame! { "x" => default(1_i64) }, frame! { "x" => default(2_i64) }],
        );
        assert_eq!(scope.get_evaluated("x").expect("resolves"), json!(1));
    }

    #[rstest]
    fn default_null_is_a_value_not_unset(engine: Engine) {
        let scope = scope_with(
            &engine,
            &[frame! { "tag_line" => default(Value::Null) }, frame! { "tag_line" => default("late") }],
        );
        assert_eq!(scope.get_evaluated("tag_line").expect("resolves"), Value::Null);
    }

    #[rstest]
    fn inherited_ops_receive_forced_prior_values(engine: Engine) {
        let seen = Arc::new(AtomicUsize::new(0));
        let probe = {
            let seen = Arc::clone(&seen);
            InheritedOp::new(move |_, inherited| {
                if inherited == Some(json!("resolved")) {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                Ok(Lazy::null())
            })
        };
        let scope = scope_with(
            &engine,
            &[
                frame! { "source" => "resolved" },
                frame! { "x" => get("source") },
                frame! { "x" => probe },
            ],
        );
        scope.get_evaluated("x").expect("resolves");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn resolution_is_lazy_until_forced(engine: Engine) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = Arc::clone(&calls);
            Lazy::computed(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!("late"))
            })
        };
        let scope = scope_with(&engine, &[frame! { "x" => counted }]);
        let resolved = scope
            .resolve("x", Requirement::Required)
            .expect("resolves")
            .expect("set");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(scope.evaluate(&resolved).expect("forces"), json!("late"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closed_schema_rejects_unknown_lookups() {
        let engine = Engine::builder().schema(Schema::from_names(["x"])).build();
        let scope = scope_with(&engine, &[frame! { "x" => 1_i64 }]);
        let err = scope.get_evaluated("y").expect_err("undeclared");
        assert!(matches!(&*err, ParamError::UnknownParameter { name } if name == "y"));
    }

    #[test]
    fn self_reference_is_bounded_by_depth() {
        let engine = Engine::new();
        let scope = scope_with(&engine, &[frame! { "x" => get("x") }]);
        let err = scope.get_evaluated("x").expect_err("cycle");
        assert!(matches!(&*err, ParamError::DepthExceeded { .. }));
    }
}
