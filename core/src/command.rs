//! Editable targets and reversible editor commands.
//!
//! - [`Editable`] - marker trait for types that commands operate on
//! - [`Command`] - a reversible edit (Command pattern), with the optional
//!   combinable capability
//!
//! Commands are self-contained: each one stores whatever it needs to apply
//! and revert its effect (resource ids, old and new values, corner indices).
//! The target is passed in on every call rather than captured, so the
//! history never holds borrows into the edited level or actor.

use std::fmt;

use crate::error::CommandResult;

/// Marker trait for types that serve as editing targets.
///
/// Implement this on whatever the editor mutates: a level definition, an
/// actor's visual shape, a GUI panel's state.
///
/// ```ignore
/// struct Level { /* ... */ }
/// impl Editable for Level {}
/// ```
pub trait Editable: 'static {}

/// A reversible editor command.
///
/// `C: Command<T>` is normally a closed enum with one variant per kind of
/// edit. The [`Invoker`](crate::Invoker) stores values of that enum directly
/// on its stacks, so no boxing or downcasting is involved.
///
/// # Combining
///
/// A command that reports [`is_combinable`](Self::is_combinable) may be
/// absorbed into an earlier pending command of the *same variant* instead of
/// being recorded separately (dragging a slider, moving a corner). The
/// invoker only offers a combine when both values have the same enum
/// discriminant; implementations match on the pair and reject everything
/// else:
///
/// ```ignore
/// fn combine(&mut self, other: &mut Self, level: &mut Level) -> bool {
///     match (self, other) {
///         (Self::ChangeSpeed { to, .. }, Self::ChangeSpeed { to: next, .. }) => {
///             level.speed = *next;
///             *to = *next;
///             true
///         }
///         _ => false,
///     }
/// }
/// ```
///
/// Variant matching relies on [`std::mem::discriminant`], which is only
/// meaningful for enums. A struct command type (a bare
/// [`Sequence`](crate::Sequence), say) must either stay non-combinable or
/// be wrapped in an enum before it is combined.
///
/// # Disposal
///
/// [`dispose`](Self::dispose) takes `self` by value. The invoker calls it
/// exactly once for every command that will never run again: failed
/// commands, combined-away commands, discarded undo entries, evicted redo
/// entries and whatever is left when the history is cleared or dropped.
pub trait Command<T: Editable>: fmt::Debug {
    /// Applies the command to the target (forward / redo direction).
    fn execute(&mut self, target: &mut T) -> CommandResult;

    /// Reverses the most recent [`execute`](Self::execute).
    ///
    /// Only called on a command whose last execute succeeded.
    fn undo(&mut self, target: &mut T) -> CommandResult;

    /// A short, human-readable description for history panels and logs.
    fn description(&self) -> &str;

    /// Releases anything the command holds. Default: nothing to release.
    fn dispose(self)
    where
        Self: Sized,
    {
    }

    /// Whether this command may be combined into an earlier pending one.
    ///
    /// Default: `false`.
    fn is_combinable(&self) -> bool {
        false
    }

    /// Absorbs `other` into `self`.
    ///
    /// Called only when `other` is combinable and has the same variant as
    /// `self`. On success the implementation applies `other`'s effect to the
    /// target, updates its own recorded end state and returns `true`; the
    /// invoker then disposes `other`. On `false` neither the target nor
    /// `self` may have changed.
    fn combine(&mut self, other: &mut Self, target: &mut T) -> bool
    where
        Self: Sized,
    {
        let _ = (other, target);
        false
    }
}
