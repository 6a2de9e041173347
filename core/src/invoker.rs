//! Undo/redo command invoker.
//!
//! [`Invoker`] executes [`Command`]s against an [`Editable`] target and keeps
//! a linear history of them on two stacks. On top of plain undo/redo it
//! understands two ways of turning several commands into one user-facing
//! step:
//!
//! - **Chaining.** A command executed with `chained = true` is glued to the
//!   entry below it. One [`undo`](Invoker::undo) pops entries until it has
//!   undone one that is not chained. [`Delimiter`]s inside such a run are
//!   stepped over.
//! - **Combining.** A [combinable](Command::is_combinable) command is offered
//!   to earlier entries of the same variant, newest first, for as long as the
//!   entries examined are chained. The first that accepts it absorbs it and
//!   the new command is never recorded. A non-chained entry, including any
//!   delimiter, ends the search.
//!
//! ```text
//! execute(X)  execute_with(Y, chained)  execute_with(Z, chained)
//! ┌──────────────────────────┐
//! │ undo: [X, Y*, Z*]        │   * = chained
//! │ redo: []                 │
//! └──────────────────────────┘
//! undo()   -> undoes Z, Y, X (one group)
//! ┌──────────────────────────┐
//! │ undo: []                 │
//! │ redo: [Z*, Y*, X]        │   X on top
//! └──────────────────────────┘
//! ```
//!
//! Commands report failure through [`CommandResult`]; the invoker logs the
//! reason and reports a `bool`, disposing whatever it will never run again.

use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::command::{Command, Editable};
use crate::config::{InvokerConfig, RedoGrouping};
use crate::delimiter::Delimiter;
use crate::error::CommandResult;

/// What a history entry holds.
#[derive(Debug)]
enum Recorded<C> {
    Command(C),
    Delimiter(Delimiter),
}

/// A recorded command together with its chained flag.
#[derive(Debug)]
struct Entry<C> {
    recorded: Recorded<C>,
    chained: bool,
    /// Set when the entry that used to end this entry's group was dropped
    /// and this one ends the group instead.
    group_base: bool,
}

impl<C> Entry<C> {
    fn command(command: C) -> Self {
        Self {
            recorded: Recorded::Command(command),
            chained: false,
            group_base: false,
        }
    }

    fn delimiter(delimiter: Delimiter) -> Self {
        Self {
            recorded: Recorded::Delimiter(delimiter),
            chained: false,
            group_base: false,
        }
    }

    fn mark_chained(&mut self) {
        self.chained = true;
    }

    /// Makes this entry end its group, even if it is a delimiter.
    fn make_group_base(&mut self) {
        self.chained = false;
        self.group_base = true;
    }

    fn is_chained(&self) -> bool {
        self.chained
    }

    fn is_delimiter(&self) -> bool {
        matches!(self.recorded, Recorded::Delimiter(_))
    }

    fn is_delimiter_named(&self, name: &str) -> bool {
        matches!(&self.recorded, Recorded::Delimiter(d) if d.is_named(name))
    }

    /// Whether a grouped undo or redo carries on past this entry.
    fn continues_group(&self) -> bool {
        !self.group_base && (self.is_chained() || self.is_delimiter())
    }

    fn execute<T: Editable>(&mut self, target: &mut T) -> CommandResult
    where
        C: Command<T>,
    {
        match &mut self.recorded {
            Recorded::Command(command) => command.execute(target),
            Recorded::Delimiter(delimiter) => Command::<T>::execute(delimiter, target),
        }
    }

    fn undo<T: Editable>(&mut self, target: &mut T) -> CommandResult
    where
        C: Command<T>,
    {
        match &mut self.recorded {
            Recorded::Command(command) => command.undo(target),
            Recorded::Delimiter(delimiter) => Command::<T>::undo(delimiter, target),
        }
    }

    fn description<T: Editable>(&self) -> &str
    where
        C: Command<T>,
    {
        match &self.recorded {
            Recorded::Command(command) => command.description(),
            Recorded::Delimiter(delimiter) => Command::<T>::description(delimiter),
        }
    }

    fn dispose<T: Editable>(self)
    where
        C: Command<T>,
    {
        match self.recorded {
            Recorded::Command(command) => command.dispose(),
            Recorded::Delimiter(delimiter) => Command::<T>::dispose(delimiter),
        }
    }
}

/// Executes commands and manages their undo/redo history.
///
/// The invoker exclusively owns every command handed to it. Each command is
/// on at most one of the two stacks, and each one is
/// [disposed](Command::dispose) exactly once when it can no longer run:
/// after failing, after being combined away, when discarded by
/// [`undo_with`](Self::undo_with), when a fresh execute clears the redo
/// stack, when evicted by the depth limit, or when the invoker is cleared or
/// dropped.
///
/// One invoker belongs to one editing session; editor tools receive it by
/// `&mut` rather than looking it up globally.
///
/// # Example
///
/// ```ignore
/// let mut invoker: Invoker<Level, LevelCommand> = Invoker::new();
/// let mut level = Level::default();
///
/// invoker.execute(LevelCommand::change_speed(&level, 5.5), &mut level);
/// invoker.undo(&mut level);
/// invoker.redo(&mut level);
/// ```
pub struct Invoker<T: Editable, C: Command<T>> {
    /// Oldest entry at the front, most recent at the back.
    undo_stack: VecDeque<Entry<C>>,
    /// Most recently undone entry at the back.
    redo_stack: Vec<Entry<C>>,
    config: InvokerConfig,
    _target: PhantomData<fn(&mut T)>,
}

impl<T: Editable, C: Command<T>> Invoker<T, C> {
    /// Creates an empty invoker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(InvokerConfig::default())
    }

    /// Creates an empty invoker with the given configuration.
    pub fn with_config(config: InvokerConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            config,
            _target: PhantomData,
        }
    }

    /// Executes a command as the start of a new undo step.
    ///
    /// See [`execute_with`](Self::execute_with).
    pub fn execute(&mut self, command: C, target: &mut T) -> bool {
        self.execute_with(command, target, false)
    }

    /// Executes a command, optionally chaining it to the entry below.
    ///
    /// If the command is combinable and an earlier entry of the same variant
    /// within the open chain absorbs it, the command is disposed and the
    /// redo stack is left as it is. Otherwise the command is executed; on
    /// success it is pushed onto the undo stack and the redo stack is
    /// cleared, on failure it is disposed and history is unchanged.
    ///
    /// Returns `true` if the command was combined or executed successfully.
    pub fn execute_with(&mut self, mut command: C, target: &mut T, chained: bool) -> bool {
        if command.is_combinable() && self.try_combine(&mut command, target) {
            log::trace!("Combined '{}' into history", command.description());
            command.dispose();
            return true;
        }

        match command.execute(target) {
            Ok(()) => {
                let mut entry = Entry::command(command);
                if chained {
                    entry.mark_chained();
                }
                self.record(entry);
                true
            }
            Err(err) => {
                log::debug!("'{}' failed: {err}", command.description());
                command.dispose();
                false
            }
        }
    }

    /// Executes several commands in order.
    ///
    /// The first command is chained if `first_chained` is set, every later
    /// one if `chained` is set. A failing command is disposed and the rest
    /// still run. Returns `true` if all of them succeeded.
    pub fn execute_all<I>(
        &mut self,
        commands: I,
        target: &mut T,
        chained: bool,
        first_chained: bool,
    ) -> bool
    where
        I: IntoIterator<Item = C>,
    {
        let mut chain = first_chained;
        let mut all_succeeded = true;
        for command in commands {
            all_succeeded &= self.execute_with(command, target, chain);
            chain = chained;
        }
        all_succeeded
    }

    /// Records a delimiter on the undo stack.
    ///
    /// Like any successful execute this clears the redo stack. The delimiter
    /// is never chained, so it ends every later combine search.
    pub fn push_delimiter(&mut self, delimiter: Delimiter) {
        log::trace!(
            "Delimiter '{}' recorded",
            delimiter.name().unwrap_or_default()
        );
        self.record(Entry::delimiter(delimiter));
    }

    /// Undoes the most recent step, moving it to the redo stack.
    ///
    /// See [`undo_with`](Self::undo_with).
    pub fn undo(&mut self, target: &mut T) -> usize {
        self.undo_with(target, true)
    }

    /// Undoes the most recent step.
    ///
    /// Pops and undoes entries until one that is neither chained nor a
    /// delimiter has been undone, or the stack runs out. Undone entries go
    /// to the redo stack if `add_to_redo_stack` is set and are disposed
    /// otherwise. An entry whose undo fails is disposed either way; if it was
    /// the one ending the group, the newest entry of the group already on the
    /// redo stack ends the group from then on.
    ///
    /// Returns the number of entries undone. An empty stack is a no-op.
    pub fn undo_with(&mut self, target: &mut T, add_to_redo_stack: bool) -> usize {
        let mut undone = 0;
        let mut pushed = false;
        let mut continue_grouping = true;
        while continue_grouping {
            let Some(entry) = self.undo_stack.pop_back() else {
                break;
            };
            continue_grouping = entry.continues_group();
            pushed = self.undo_entry(entry, target, add_to_redo_stack, pushed);
            undone += 1;
        }
        undone
    }

    /// Undoes entries one by one, ignoring chaining, up to and including
    /// the most recent delimiter called `name`.
    ///
    /// Undone entries go to the redo stack. If no such delimiter exists the
    /// whole undo stack is undone. Returns the number of entries undone.
    pub fn undo_to_delimiter(&mut self, name: &str, target: &mut T) -> usize {
        self.undo_to_delimiter_with(name, target, true)
    }

    /// Like [`undo_to_delimiter`](Self::undo_to_delimiter), disposing the
    /// undone entries unless `add_to_redo_stack` is set.
    pub fn undo_to_delimiter_with(
        &mut self,
        name: &str,
        target: &mut T,
        add_to_redo_stack: bool,
    ) -> usize {
        let mut undone = 0;
        let mut pushed = false;
        while let Some(entry) = self.undo_stack.pop_back() {
            let found = entry.is_delimiter_named(name);
            pushed = self.undo_entry(entry, target, add_to_redo_stack, pushed);
            undone += 1;
            if found {
                break;
            }
        }
        undone
    }

    /// Redoes the most recently undone step.
    ///
    /// How many entries one call replays depends on
    /// [`InvokerConfig::redo_grouping`]. A redo whose execute fails is
    /// logged and still moved to the undo stack.
    ///
    /// Returns the number of entries redone. An empty stack is a no-op.
    pub fn redo(&mut self, target: &mut T) -> usize {
        let mut redone = 0;
        let mut continue_grouping = true;
        while continue_grouping {
            let Some(mut entry) = self.redo_stack.pop() else {
                break;
            };
            if let Err(err) = entry.execute(target) {
                log::warn!("Redo of '{}' failed: {err}", entry.description::<T>());
            }
            self.undo_stack.push_back(entry);
            redone += 1;

            if let Some(next) = self.redo_stack.last() {
                match self.config.redo_grouping {
                    RedoGrouping::Mirror => continue_grouping = next.continues_group(),
                    // Only ever switched on, so the whole stack is replayed.
                    RedoGrouping::Exhaustive => continue_grouping |= next.continues_group(),
                }
            }
        }
        self.enforce_max_undo();
        redone
    }

    /// Returns `true` if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Disposes every entry on the redo stack.
    pub fn clear_redo(&mut self) {
        for entry in self.redo_stack.drain(..).rev() {
            entry.dispose::<T>();
        }
    }

    /// Undoes the most recent step and forgets it entirely.
    ///
    /// For edits that turn out to be invalid after the fact (a polygon
    /// that self-intersects once a corner is added): the step is undone,
    /// disposed, and the redo stack is cleared so it cannot come back.
    pub fn retract_last(&mut self, target: &mut T) -> usize {
        let undone = self.undo_with(target, false);
        self.clear_redo();
        undone
    }

    /// Disposes every entry on both stacks.
    pub fn clear(&mut self) {
        self.clear_redo();
        for entry in self.undo_stack.drain(..).rev() {
            entry.dispose::<T>();
        }
    }

    /// Tears the invoker down, disposing all history.
    pub fn dispose(mut self) {
        self.clear();
    }

    /// Returns an iterator over undo entry descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|e| e.description::<T>())
    }

    /// Returns an iterator over redo entry descriptions, next to redo first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|e| e.description::<T>())
    }

    /// Returns the number of entries on the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of entries on the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Offers `command` to the open chain at the top of the undo stack.
    fn try_combine(&mut self, command: &mut C, target: &mut T) -> bool {
        let variant = mem::discriminant(&*command);
        for entry in self.undo_stack.iter_mut().rev() {
            if let Recorded::Command(pending) = &mut entry.recorded
                && mem::discriminant(&*pending) == variant
                && pending.combine(command, target)
            {
                return true;
            }
            if !entry.is_chained() {
                break;
            }
        }
        false
    }

    /// Pushes a freshly executed entry and invalidates the redo stack.
    fn record(&mut self, entry: Entry<C>) {
        self.undo_stack.push_back(entry);
        self.clear_redo();
        self.enforce_max_undo();
    }

    /// Undoes one popped entry, moving it to the redo stack or disposing it.
    ///
    /// `pushed` tells whether the current undo call already moved an entry
    /// to the redo stack. Returns the updated value.
    fn undo_entry(
        &mut self,
        mut entry: Entry<C>,
        target: &mut T,
        add_to_redo_stack: bool,
        pushed: bool,
    ) -> bool {
        match entry.undo(target) {
            Ok(()) if add_to_redo_stack => {
                self.redo_stack.push(entry);
                true
            }
            Ok(()) => {
                entry.dispose::<T>();
                pushed
            }
            Err(err) => {
                log::warn!(
                    "Undo of '{}' failed, dropping it from history: {err}",
                    entry.description::<T>()
                );
                // The dropped entry ended its group on the redo stack; the
                // newest survivor of that group takes over.
                if pushed
                    && !entry.continues_group()
                    && let Some(survivor) = self.redo_stack.last_mut()
                {
                    log::trace!("'{}' now ends its redo group", survivor.description::<T>());
                    survivor.make_group_base();
                }
                entry.dispose::<T>();
                pushed
            }
        }
    }

    fn enforce_max_undo(&mut self) {
        let Some(max_undo) = self.config.max_undo else {
            return;
        };
        while self.undo_stack.len() > max_undo {
            let Some(oldest) = self.undo_stack.pop_front() else {
                break;
            };
            log::debug!(
                "Undo limit {max_undo} reached, evicting '{}'",
                oldest.description::<T>()
            );
            oldest.dispose::<T>();
        }
    }
}

impl<T: Editable, C: Command<T>> Default for Invoker<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Editable, C: Command<T>> Drop for Invoker<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Editable, C: Command<T>> fmt::Debug for Invoker<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}
