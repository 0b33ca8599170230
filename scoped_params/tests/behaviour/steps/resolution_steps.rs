//! Steps resolving parameters and asserting on the outcome.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{then, when};
use scoped_params::{
    Engine, Lazy, ParamError, ParamResult, Scope, TemplateRef, objectify, objectify_names,
    template,
};
use serde_json::Value;
use test_helpers::text::{parse_literal, split_names, unquote};

use crate::fixtures::ScopeContext;

fn active_scope(scope_context: &ScopeContext) -> ParamResult<Scope> {
    scope_context
        .frames()
        .iter()
        .try_fold(Engine::new().scope(), |scope, frame| scope.push(frame))
}

fn outcome(scope_context: &ScopeContext) -> Result<ParamResult<Value>> {
    scope_context
        .result
        .take()
        .ok_or_else(|| anyhow!("no parameter was resolved"))
}

fn failure(scope_context: &ScopeContext) -> Result<std::sync::Arc<ParamError>> {
    outcome(scope_context)?
        .err()
        .ok_or_else(|| anyhow!("expected resolution to fail"))
}

#[when("{name} is resolved")]
fn resolve(scope_context: &ScopeContext, name: String) {
    let result = active_scope(scope_context).and_then(|scope| scope.get_evaluated(unquote(&name)));
    scope_context.result.set(result);
}

#[when("the movie summary is evaluated")]
fn evaluate_summary(scope_context: &ScopeContext) {
    let slug = Lazy::computed(|scope| {
        let title = scope.get_evaluated("title")?;
        let text = title.as_str().unwrap_or_default();
        Ok(Value::String(text.to_lowercase().replace(' ', "-")))
    });
    let summary = template(
        ["", " (", ")"],
        vec![TemplateRef::param("title"), TemplateRef::param("genre")],
    );
    let tree = objectify(
        ["tag_line", "awards"],
        [("id", slug), ("summary", Lazy::from(summary))],
    );
    let result = active_scope(scope_context).and_then(|scope| scope.evaluate(&tree));
    scope_context.result.set(result);
}

#[when("the names {names} are objectified")]
fn evaluate_objectified(scope_context: &ScopeContext, names: String) {
    let tree = objectify_names(split_names(&names));
    let result = active_scope(scope_context).and_then(|scope| scope.evaluate(&tree));
    scope_context.result.set(result);
}

#[then("the result is {expected}")]
fn assert_result(scope_context: &ScopeContext, expected: String) -> Result<()> {
    let actual = outcome(scope_context)?.map_err(|err| anyhow!(err))?;
    let wanted = parse_literal(&expected);
    ensure!(actual == wanted, "expected {wanted}, got {actual}");
    Ok(())
}

#[then("resolution fails because no scope is active")]
fn assert_empty_scope(scope_context: &ScopeContext) -> Result<()> {
    let err = failure(scope_context)?;
    ensure!(
        matches!(&*err, ParamError::EmptyScope { .. }),
        "unexpected error variant: {err:?}"
    );
    Ok(())
}

#[then("resolution fails because {name} is missing")]
fn assert_missing(scope_context: &ScopeContext, name: String) -> Result<()> {
    let err = failure(scope_context)?;
    let wanted = unquote(&name);
    ensure!(
        matches!(
            &*err,
            ParamError::MissingParameter { name: missing, stack } if missing == wanted && !stack.is_empty()
        ),
        "unexpected error variant: {err:?}"
    );
    Ok(())
}

#[then("merging fails for {type_name} values")]
fn assert_unsupported_merge(scope_context: &ScopeContext, type_name: String) -> Result<()> {
    let err = failure(scope_context)?;
    let wanted = unquote(&type_name);
    ensure!(
        matches!(&*err, ParamError::UnsupportedMergeType { type_name: found } if *found == wanted),
        "unexpected error variant: {err:?}"
    );
    Ok(())
}
