//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{ScopeContext, scope_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/scoping.feature",
    fixtures = [scope_context: ScopeContext]
);
