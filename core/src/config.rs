//! Invoker configuration.

/// How far a single [`Invoker::redo`](crate::Invoker::redo) call replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedoGrouping {
    /// Mirror undo grouping: after redoing an entry, keep going only while
    /// the next redo entry is chained or is a delimiter. One redo restores
    /// exactly what one undo removed.
    #[default]
    Mirror,
    /// Once started, replay the entire redo stack.
    ///
    /// Kept for call sites written against the older engine, whose redo
    /// loop only ever switched its continuation flag on.
    Exhaustive,
}

/// Configuration for an [`Invoker`](crate::Invoker).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Redo grouping policy.
    pub redo_grouping: RedoGrouping,
    /// Maximum number of undo entries; the oldest are disposed beyond it.
    /// `None` keeps everything.
    pub max_undo: Option<usize>,
}

impl InvokerConfig {
    /// Sets the redo grouping policy.
    #[must_use]
    pub fn with_redo_grouping(mut self, redo_grouping: RedoGrouping) -> Self {
        self.redo_grouping = redo_grouping;
        self
    }

    /// Bounds the undo stack to `max_undo` entries.
    #[must_use]
    pub fn with_max_undo(mut self, max_undo: usize) -> Self {
        self.max_undo = Some(max_undo);
        self
    }
}
