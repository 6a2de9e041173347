//! Composite command running children in order.

use crate::command::{Command, Editable};
use crate::error::CommandResult;

/// A command made of child commands executed in order and undone in
/// reverse order.
///
/// Execution stops at the first failing child and reports its error
/// (wrapped in [`CommandError::SequenceStep`](crate::CommandError::SequenceStep)).
/// Children that already ran are **not** rolled back; callers that need
/// all-or-nothing behavior retract the whole entry through the invoker.
///
/// A sequence is never combinable. It can be stored in the history as a
/// variant of the caller's command enum:
///
/// ```ignore
/// #[derive(Debug)]
/// enum ActorCommand {
///     AddCorner(AddCorner),
///     Batch(Sequence<ActorCommand>),
/// }
/// ```
#[derive(Debug)]
pub struct Sequence<C> {
    description: String,
    commands: Vec<C>,
}

impl<C> Sequence<C> {
    /// Creates an empty sequence.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            commands: Vec::new(),
        }
    }

    /// Creates a sequence from commands in execution order.
    pub fn from_commands(
        description: impl Into<String>,
        commands: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            description: description.into(),
            commands: commands.into_iter().collect(),
        }
    }

    /// Appends a command.
    pub fn push(&mut self, command: C) {
        self.commands.push(command);
    }

    /// Appends a command, builder style.
    #[must_use]
    pub fn with(mut self, command: C) -> Self {
        self.commands.push(command);
        self
    }

    /// Number of child commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The children in execution order.
    pub fn commands(&self) -> &[C] {
        &self.commands
    }
}

impl<T: Editable, C: Command<T>> Command<T> for Sequence<C> {
    fn execute(&mut self, target: &mut T) -> CommandResult {
        for (index, command) in self.commands.iter_mut().enumerate() {
            command
                .execute(target)
                .map_err(|err| err.in_sequence_step(index))?;
        }
        Ok(())
    }

    fn undo(&mut self, target: &mut T) -> CommandResult {
        for (index, command) in self.commands.iter_mut().enumerate().rev() {
            command
                .undo(target)
                .map_err(|err| err.in_sequence_step(index))?;
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn dispose(self) {
        for command in self.commands {
            command.dispose();
        }
    }
}
