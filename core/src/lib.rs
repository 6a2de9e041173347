//! # Voider Core
//!
//! Reversible command history shared by the Voider level, ship and bullet
//! editors.
//!
//! - [`Editable`] - marker trait for types that can be edited
//! - [`Command`] - a reversible edit, optionally combinable
//! - [`Delimiter`] - no-op history boundary
//! - [`Sequence`] - composite command
//! - [`Invoker`] - undo/redo stacks with chaining and combining
//!
//! # Chained vs combined
//!
//! *Chaining* groups several recorded commands into one undo step: a tool
//! that removes a corner and then fixes the actor's fixtures executes the
//! second command chained, so one undo reverts both. *Combining* keeps
//! several commands from being recorded at all: each tick of a slider drag
//! is absorbed into the first tick's command, so the history holds a single
//! entry from the original value to the final one.
//!
//! Delimiters sit between the two: undo grouping steps over them, combining
//! stops at them.

mod command;
mod config;
mod delimiter;
mod error;
mod invoker;
mod sequence;

pub use command::{Command, Editable};
pub use config::{InvokerConfig, RedoGrouping};
pub use delimiter::Delimiter;
pub use error::{CommandError, CommandResult};
pub use invoker::Invoker;
pub use sequence::Sequence;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
