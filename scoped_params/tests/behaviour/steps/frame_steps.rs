//! Steps that build the active frames.

use anyhow::{Result, anyhow};
use rstest_bdd::ScenarioState as _;
use rstest_bdd_macros::given;
use scoped_params::{default, frame, merge, template_str};
use test_helpers::text::{parse_literal, unquote};

use crate::fixtures::ScopeContext;

#[given("no active frames")]
fn no_frames(scope_context: &ScopeContext) {
    scope_context.reset();
}

#[given("a frame binding {name} to {value}")]
fn bind(scope_context: &ScopeContext, name: String, value: String) {
    scope_context.push(frame! { unquote(&name) => parse_literal(&value) });
}

#[given("a frame defaulting {name} to {value}")]
fn bind_default(scope_context: &ScopeContext, name: String, value: String) {
    scope_context.push(frame! { unquote(&name) => default(parse_literal(&value)) });
}

#[given("a frame merging {value} into {name}")]
fn bind_merge(scope_context: &ScopeContext, value: String, name: String) {
    scope_context.push(frame! { unquote(&name) => merge([parse_literal(&value)]) });
}

#[given("a frame rendering {name} from {pattern}")]
fn bind_template(scope_context: &ScopeContext, name: String, pattern: String) -> Result<()> {
    let op = template_str(unquote(&pattern)).map_err(|err| anyhow!(err))?;
    scope_context.push(frame! { unquote(&name) => op });
    Ok(())
}
