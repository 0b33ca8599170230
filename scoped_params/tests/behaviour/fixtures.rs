//! Shared fixtures for the behavioural scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use scoped_params::{Frame, ParamResult};
use serde_json::Value;

/// Frames pushed by `Given` steps and the outcome of the `When` step.
#[derive(Debug, Default, ScenarioState)]
pub struct ScopeContext {
    /// Frames in push order, outermost first.
    pub frames: Slot<Vec<Frame>>,
    /// Result of the last resolution or evaluation.
    pub result: Slot<ParamResult<Value>>,
}

impl ScopeContext {
    /// Append `frame` to the frames pushed so far.
    pub fn push(&self, frame: Frame) {
        let mut frames = self.frames.take().unwrap_or_default();
        frames.push(frame);
        self.frames.set(frames);
    }

    /// Frames pushed so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.with_ref(Clone::clone).unwrap_or_default()
    }
}

/// Creates a clean context for each scenario.
#[fixture]
pub fn scope_context() -> ScopeContext {
    ScopeContext::default()
}
