//! The persistent scope stack.
//!
//! A [`Scope`] is an immutable chain of frames. Pushing a frame returns a new,
//! longer scope and leaves the receiver untouched, so "popping" is simply
//! dropping the extended value. Every nested evaluation therefore sees a
//! stack that is balanced by construction, including when forcing fails and
//! the error is propagated with `?`.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::engine::EngineContext;
use crate::error::{FrameSummary, StackSnapshot};
use crate::{Frame, Lazy, ParamError, ParamResult, evaluate};

#[derive(Debug)]
struct Node {
    frame: Frame,
    below: Option<Arc<Node>>,
}

/// An evaluation-local view of the active frames.
///
/// Scopes are obtained from [`crate::Engine::scope`] and handed to every
/// [`crate::Thunk`] and [`crate::InheritedOp`] when it is forced.
#[derive(Clone, Debug)]
pub struct Scope {
    context: Arc<EngineContext>,
    top: Option<Arc<Node>>,
    len: usize,
    depth: usize,
}

impl Scope {
    pub(crate) const fn root(context: Arc<EngineContext>) -> Self {
        Self {
            context,
            top: None,
            len: 0,
            depth: 0,
        }
    }

    /// Return a scope with `frame` pushed on top.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownParameter`] when the engine has a closed
    /// schema that rejects one of the frame's names.
    pub fn push(&self, frame: &Frame) -> ParamResult<Self> {
        for name in frame.names() {
            self.check_declared(name)?;
        }
        let node = Node {
            frame: frame.clone(),
            below: self.top.clone(),
        };
        trace!(
            depth = self.len + 1,
            names = ?frame.names().collect::<Vec<_>>(),
            "pushed parameter frame"
        );
        Ok(Self {
            context: Arc::clone(&self.context),
            top: Some(Arc::new(node)),
            len: self.len + 1,
            depth: self.depth,
        })
    }

    /// Number of active frames.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no frame is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nested forces that led to this scope.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Active frames ordered from the outermost (oldest) to the innermost.
    #[must_use]
    pub fn frames(&self) -> Vec<&Frame> {
        let mut frames = Vec::with_capacity(self.len);
        let mut cursor = self.top.as_deref();
        while let Some(node) = cursor {
            frames.push(&node.frame);
            cursor = node.below.as_deref();
        }
        frames.reverse();
        frames
    }

    /// Capture the names bound by every active frame, outermost first.
    #[must_use]
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot::new(
            self.frames()
                .into_iter()
                .map(|frame| FrameSummary::new(frame.names().map(str::to_owned).collect()))
                .collect(),
        )
    }

    /// Fully evaluate `lazy` within this scope.
    ///
    /// # Errors
    ///
    /// Propagates any failure raised while forcing the tree.
    pub fn evaluate(&self, lazy: &Lazy) -> ParamResult<serde_json::Value> {
        evaluate(self, lazy)
    }

    /// Scope used to force one more level of deferred values.
    pub(crate) fn descend(&self) -> ParamResult<Self> {
        let limit = self.context.options.max_depth;
        if self.depth >= limit {
            debug!(limit, "evaluation depth limit reached");
            return Err(ParamError::DepthExceeded { limit }.into());
        }
        Ok(Self {
            context: Arc::clone(&self.context),
            top: self.top.clone(),
            len: self.len,
            depth: self.depth + 1,
        })
    }

    pub(crate) fn check_declared(&self, name: &str) -> ParamResult<()> {
        let context = &self.context;
        if context.options.reject_unknown && !context.schema.contains(name) {
            return Err(ParamError::UnknownParameter {
                name: name.to_owned(),
            }
            .into());
        }
        Ok(())
    }
}
