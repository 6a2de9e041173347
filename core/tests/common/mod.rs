//! Shared test doubles for the invoker integration tests.
//!
//! Every [`Edit`] gets an id from a [`Tracker`], and the tracker records the
//! id when the edit is disposed. Descriptions are `#<id>` so that the
//! invoker's description iterators can be mapped back to ids.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use voider_core::{Command, CommandError, CommandResult, Editable, Sequence};

/// Target edited by the test commands.
#[derive(Debug, Default)]
pub struct Scene {
    pub value: i32,
    pub size: i32,
    pub journal: Vec<String>,
}

impl Editable for Scene {}

impl Scene {
    /// The observable state, without the journal.
    pub fn state(&self) -> (i32, i32) {
        (self.value, self.size)
    }
}

/// Hands out ids and records disposals.
#[derive(Debug)]
pub struct Tracker {
    next_id: Cell<u32>,
    disposed: RefCell<Vec<u32>>,
    combining: Cell<bool>,
}

impl Tracker {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(0),
            disposed: RefCell::new(Vec::new()),
            combining: Cell::new(true),
        })
    }

    fn tag(self: &Rc<Self>) -> Tag {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Tag {
            id,
            label: format!("#{id}"),
            tracker: Rc::clone(self),
        }
    }

    /// Number of edits created so far.
    pub fn created(&self) -> u32 {
        self.next_id.get()
    }

    /// Ids of disposed edits, in disposal order.
    pub fn disposed(&self) -> Vec<u32> {
        self.disposed.borrow().clone()
    }

    pub fn was_disposed(&self, id: u32) -> bool {
        self.disposed.borrow().contains(&id)
    }

    /// Turns combining on or off for every drag and resize.
    pub fn set_combining(&self, combining: bool) {
        self.combining.set(combining);
    }

    pub fn add(self: &Rc<Self>, amount: i32) -> Edit {
        Edit::Add {
            tag: self.tag(),
            amount,
        }
    }

    pub fn drag(self: &Rc<Self>, from: i32, to: i32) -> Edit {
        Edit::Drag {
            tag: self.tag(),
            from,
            to,
        }
    }

    pub fn resize(self: &Rc<Self>, from: i32, to: i32) -> Edit {
        Edit::Resize {
            tag: self.tag(),
            from,
            to,
        }
    }

    pub fn broken(self: &Rc<Self>) -> Edit {
        Edit::Broken {
            tag: self.tag(),
        }
    }

    pub fn stuck(self: &Rc<Self>) -> Edit {
        Edit::Stuck {
            tag: self.tag(),
        }
    }

    pub fn once(self: &Rc<Self>, amount: i32) -> Edit {
        Edit::Once {
            tag: self.tag(),
            amount,
            ran: false,
        }
    }
}

#[derive(Debug)]
pub struct Tag {
    pub id: u32,
    pub label: String,
    tracker: Rc<Tracker>,
}

impl Tag {
    fn record_disposal(&self) {
        self.tracker.disposed.borrow_mut().push(self.id);
    }
}

/// Test command enum.
#[derive(Debug)]
pub enum Edit {
    /// Adds to `value`. Not combinable.
    Add { tag: Tag, amount: i32 },
    /// Sets `value`. Combinable with other drags.
    Drag { tag: Tag, from: i32, to: i32 },
    /// Sets `size`. Combinable with other resizes.
    Resize { tag: Tag, from: i32, to: i32 },
    /// Always fails to execute.
    Broken { tag: Tag },
    /// Executes, but refuses to undo.
    Stuck { tag: Tag },
    /// Adds to `value` the first time only; a second execute fails.
    Once {
        tag: Tag,
        amount: i32,
        ran: bool,
    },
    Batch(Sequence<Edit>),
}

impl Edit {
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Self::Add { tag, .. }
            | Self::Drag { tag, .. }
            | Self::Resize { tag, .. }
            | Self::Broken { tag }
            | Self::Stuck { tag }
            | Self::Once { tag, .. } => Some(tag),
            Self::Batch(_) => None,
        }
    }

    /// Id of a leaf edit. Panics on a batch.
    pub fn id(&self) -> u32 {
        self.tag().map(|t| t.id).expect("batches have no id")
    }
}

impl Command<Scene> for Edit {
    fn execute(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Self::Add { amount, .. } => scene.value += *amount,
            Self::Drag { to, .. } => scene.value = *to,
            Self::Resize { to, .. } => scene.size = *to,
            Self::Broken { tag } => {
                return Err(CommandError::InvalidState(format!("{} is broken", tag.label)));
            }
            Self::Stuck { .. } => {}
            Self::Once { amount, ran, tag } => {
                if *ran {
                    return Err(CommandError::Custom(format!("{} already ran", tag.label)));
                }
                *ran = true;
                scene.value += *amount;
            }
            Self::Batch(sequence) => return sequence.execute(scene),
        }
        let label = self.description().to_string();
        scene.journal.push(format!("do {label}"));
        Ok(())
    }

    fn undo(&mut self, scene: &mut Scene) -> CommandResult {
        match self {
            Self::Add { amount, .. } => scene.value -= *amount,
            Self::Drag { from, .. } => scene.value = *from,
            Self::Resize { from, .. } => scene.size = *from,
            Self::Broken { tag } => {
                return Err(CommandError::InvalidState(format!("{} is broken", tag.label)));
            }
            Self::Stuck { tag } => {
                return Err(CommandError::Custom(format!("{} cannot be undone", tag.label)));
            }
            Self::Once { amount, .. } => scene.value -= *amount,
            Self::Batch(sequence) => return sequence.undo(scene),
        }
        let label = self.description().to_string();
        scene.journal.push(format!("undo {label}"));
        Ok(())
    }

    fn description(&self) -> &str {
        match self {
            Self::Batch(sequence) => Command::<Scene>::description(sequence),
            leaf => leaf.tag().map(|t| t.label.as_str()).unwrap_or_default(),
        }
    }

    fn dispose(self) {
        match self {
            Self::Batch(sequence) => Command::<Scene>::dispose(sequence),
            leaf => {
                if let Some(tag) = leaf.tag() {
                    tag.record_disposal();
                }
            }
        }
    }

    fn is_combinable(&self) -> bool {
        matches!(self, Self::Drag { .. } | Self::Resize { .. })
    }

    fn combine(&mut self, other: &mut Self, scene: &mut Scene) -> bool {
        match (self, other) {
            (
                Self::Drag { tag, to, .. },
                Self::Drag {
                    tag: incoming,
                    to: next,
                    ..
                },
            ) if tag.tracker.combining.get() => {
                scene.value = *next;
                *to = *next;
                scene
                    .journal
                    .push(format!("combine {} into {}", incoming.label, tag.label));
                true
            }
            (
                Self::Resize { tag, to, .. },
                Self::Resize {
                    tag: incoming,
                    to: next,
                    ..
                },
            ) if tag.tracker.combining.get() => {
                scene.size = *next;
                *to = *next;
                scene
                    .journal
                    .push(format!("combine {} into {}", incoming.label, tag.label));
                true
            }
            _ => false,
        }
    }
}

/// Parses `#<id>` descriptions, skipping delimiters and batches.
pub fn ids<'a>(descriptions: impl Iterator<Item = &'a str>) -> Vec<u32> {
    descriptions
        .filter_map(|d| d.strip_prefix('#'))
        .filter_map(|id| id.parse().ok())
        .collect()
}
