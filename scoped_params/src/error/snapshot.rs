//! Diagnostic snapshots of the scope stack.

use std::fmt;

/// Parameter names bound by a single frame at the time of a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSummary {
    names: Vec<String>,
}

impl FrameSummary {
    /// Build a summary from the names a frame binds. Names are sorted so the
    /// rendering is stable.
    #[must_use]
    pub fn new(mut names: Vec<String>) -> Self {
        names.sort_unstable();
        Self { names }
    }

    /// Names bound by the frame, sorted.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Ordered view of the active frames, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackSnapshot {
    frames: Vec<FrameSummary>,
}

impl StackSnapshot {
    /// Create a snapshot from frame summaries ordered outermost first.
    #[must_use]
    pub const fn new(frames: Vec<FrameSummary>) -> Self {
        Self { frames }
    }

    /// Frame summaries, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[FrameSummary] {
        &self.frames
    }

    /// Number of frames captured.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no frame was active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for StackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return f.write_str("<none>");
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{{{}}}", frame.names.join(", "))?;
        }
        Ok(())
    }
}
