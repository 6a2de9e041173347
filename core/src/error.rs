//! Error type reported by commands.

use thiserror::Error;

/// Why a command could not be executed or undone.
///
/// The [`Invoker`](crate::Invoker) never surfaces these to its caller; it
/// logs them and reports a plain `bool`. They exist so that commands can
/// use `?` internally and so that composite commands can say which child
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The object the command operates on does not exist.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    /// The target is in a state where the command does not apply.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// A child of a [`Sequence`](crate::Sequence) failed.
    #[error("sequence step {index} failed: {source}")]
    SequenceStep {
        /// Position of the failing child in execution order.
        index: usize,
        /// The child's own error.
        #[source]
        source: Box<CommandError>,
    },
    /// Any other failure, with a description.
    #[error("{0}")]
    Custom(String),
}

impl CommandError {
    /// Wraps `self` as the failure of sequence child `index`.
    pub fn in_sequence_step(self, index: usize) -> Self {
        Self::SequenceStep {
            index,
            source: Box::new(self),
        }
    }
}

/// Result type for command operations.
pub type CommandResult<T = ()> = Result<T, CommandError>;
