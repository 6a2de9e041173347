//! No-op boundary marker for the undo history.

use crate::command::{Command, Editable};
use crate::error::CommandResult;

/// A command that does nothing, recorded only to mark a boundary.
///
/// The [`Invoker`](crate::Invoker) treats delimiters asymmetrically:
///
/// - **Combining** stops at a delimiter. It is never chained, so a new
///   combinable command cannot merge into anything recorded before it.
/// - **Undo grouping** steps over it. A single undo that reaches a delimiter
///   keeps going to the entry below.
///
/// A delimiter may carry a name so that
/// [`Invoker::undo_to_delimiter`](crate::Invoker::undo_to_delimiter) can
/// rewind to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delimiter {
    name: Option<String>,
}

impl Delimiter {
    /// Creates an unnamed delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a delimiter that can be found by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The delimiter's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if this delimiter carries exactly `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

impl<T: Editable> Command<T> for Delimiter {
    fn execute(&mut self, _target: &mut T) -> CommandResult {
        Ok(())
    }

    fn undo(&mut self, _target: &mut T) -> CommandResult {
        Ok(())
    }

    fn description(&self) -> &str {
        self.name.as_deref().unwrap_or("Delimiter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level {
        speed: f32,
    }

    impl Editable for Level {}

    #[test]
    fn execute_and_undo_leave_target_alone() {
        let mut level = Level { speed: 1.5 };
        let mut delimiter = Delimiter::new();
        Command::<Level>::execute(&mut delimiter, &mut level).unwrap();
        assert_eq!(level.speed, 1.5);
        Command::<Level>::undo(&mut delimiter, &mut level).unwrap();
        assert_eq!(level.speed, 1.5);
    }

    #[test]
    fn never_combinable() {
        assert!(!Command::<Level>::is_combinable(&Delimiter::named("drag")));
    }

    #[test]
    fn names() {
        let unnamed = Delimiter::new();
        assert_eq!(unnamed.name(), None);
        assert!(!unnamed.is_named("start"));
        assert_eq!(Command::<Level>::description(&unnamed), "Delimiter");

        let named = Delimiter::named("start");
        assert_eq!(named.name(), Some("start"));
        assert!(named.is_named("start"));
        assert!(!named.is_named("end"));
        assert_eq!(Command::<Level>::description(&named), "start");
    }
}
