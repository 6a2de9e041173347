//! # Voider Level Editor Demo
//!
//! A small level model edited through the command history:
//!
//! - [`Level`] - scroll speed and the corners of the level's border polygon
//! - [`LevelCommand`] - every edit the demo editor can make
//! - [`LevelEditor`] - owns the level and its [`Invoker`], and validates
//!   corner edits after the fact
//!
//! Speed changes and corner moves are combinable, so dragging a slider or a
//! corner handle leaves a single history entry behind.

use voider_core::{
    Command, CommandError, CommandResult, Delimiter, Editable, Invoker, InvokerConfig, Sequence,
};

/// Corners closer than this (squared distance) make the polygon invalid.
pub const MIN_CORNER_DIST_SQ: f32 = 0.25;

/// Default level scroll speed.
pub const DEFAULT_SPEED: f32 = 15.0;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub x: f32,
    pub y: f32,
}

impl Corner {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn dist_sq(self, other: Corner) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// The editable level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    speed: f32,
    corners: Vec<Corner>,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            corners: Vec::new(),
        }
    }
}

impl Editable for Level {}

impl Level {
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Returns `true` if two neighbouring corners (including last -> first)
    /// are closer than [`MIN_CORNER_DIST_SQ`].
    pub fn has_close_corners(&self) -> bool {
        let count = self.corners.len();
        if count < 2 {
            return false;
        }
        (0..count).any(|i| {
            let next = (i + 1) % count;
            self.corners[i].dist_sq(self.corners[next]) < MIN_CORNER_DIST_SQ
        })
    }

    fn corner_mut(&mut self, index: usize) -> CommandResult<&mut Corner> {
        let count = self.corners.len();
        self.corners
            .get_mut(index)
            .ok_or_else(|| CommandError::TargetNotFound(format!("corner {index} of {count}")))
    }
}

/// Edits of a [`Level`].
#[derive(Debug)]
pub enum LevelCommand {
    ChangeSpeed { from: f32, to: f32 },
    AddCorner { index: usize, corner: Corner },
    MoveCorner { index: usize, from: Corner, to: Corner },
    RemoveCorner { index: usize, removed: Option<Corner> },
    Batch(Sequence<LevelCommand>),
}

impl LevelCommand {
    pub fn change_speed(level: &Level, to: f32) -> Self {
        Self::ChangeSpeed {
            from: level.speed,
            to,
        }
    }

    pub fn add_corner(index: usize, corner: Corner) -> Self {
        Self::AddCorner { index, corner }
    }

    /// Fails if the level has no corner at `index`.
    pub fn move_corner(level: &Level, index: usize, to: Corner) -> CommandResult<Self> {
        let from = level.corners.get(index).copied().ok_or_else(|| {
            CommandError::TargetNotFound(format!("corner {index} of {}", level.corners.len()))
        })?;
        Ok(Self::MoveCorner { index, from, to })
    }

    pub fn remove_corner(index: usize) -> Self {
        Self::RemoveCorner {
            index,
            removed: None,
        }
    }
}

impl Command<Level> for LevelCommand {
    fn execute(&mut self, level: &mut Level) -> CommandResult {
        match self {
            Self::ChangeSpeed { to, .. } => {
                if *to <= 0.0 {
                    return Err(CommandError::InvalidState(format!(
                        "speed must be positive, got {to}"
                    )));
                }
                level.speed = *to;
            }
            Self::AddCorner { index, corner } => {
                if *index > level.corners.len() {
                    return Err(CommandError::TargetNotFound(format!(
                        "insert position {index} of {}",
                        level.corners.len()
                    )));
                }
                level.corners.insert(*index, *corner);
            }
            Self::MoveCorner { index, to, .. } => *level.corner_mut(*index)? = *to,
            Self::RemoveCorner { index, removed } => {
                level.corner_mut(*index)?;
                *removed = Some(level.corners.remove(*index));
            }
            Self::Batch(sequence) => sequence.execute(level)?,
        }
        Ok(())
    }

    fn undo(&mut self, level: &mut Level) -> CommandResult {
        match self {
            Self::ChangeSpeed { from, .. } => level.speed = *from,
            Self::AddCorner { index, .. } => {
                level.corner_mut(*index)?;
                level.corners.remove(*index);
            }
            Self::MoveCorner { index, from, .. } => *level.corner_mut(*index)? = *from,
            Self::RemoveCorner { index, removed } => {
                if *index > level.corners.len() {
                    return Err(CommandError::TargetNotFound(format!(
                        "insert position {index} of {}",
                        level.corners.len()
                    )));
                }
                let corner = removed.take().ok_or_else(|| {
                    CommandError::InvalidState(format!("corner {index} was never removed"))
                })?;
                level.corners.insert(*index, corner);
            }
            Self::Batch(sequence) => sequence.undo(level)?,
        }
        Ok(())
    }

    fn description(&self) -> &str {
        match self {
            Self::ChangeSpeed { .. } => "Change level speed",
            Self::AddCorner { .. } => "Add corner",
            Self::MoveCorner { .. } => "Move corner",
            Self::RemoveCorner { .. } => "Remove corner",
            Self::Batch(sequence) => Command::<Level>::description(sequence),
        }
    }

    fn is_combinable(&self) -> bool {
        matches!(self, Self::ChangeSpeed { .. } | Self::MoveCorner { .. })
    }

    fn combine(&mut self, other: &mut Self, level: &mut Level) -> bool {
        match (self, other) {
            (Self::ChangeSpeed { to, .. }, Self::ChangeSpeed { to: next, .. }) => {
                level.speed = *next;
                *to = *next;
                true
            }
            (
                Self::MoveCorner { index, to, .. },
                Self::MoveCorner {
                    index: other_index,
                    to: next,
                    ..
                },
            ) if index == other_index => {
                let Ok(corner) = level.corner_mut(*index) else {
                    return false;
                };
                *corner = *next;
                *to = *next;
                true
            }
            _ => false,
        }
    }
}

/// A level together with its edit history.
#[derive(Debug)]
pub struct LevelEditor {
    level: Level,
    invoker: Invoker<Level, LevelCommand>,
}

impl LevelEditor {
    pub fn new(config: InvokerConfig) -> Self {
        Self {
            level: Level::default(),
            invoker: Invoker::with_config(config),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn invoker(&self) -> &Invoker<Level, LevelCommand> {
        &self.invoker
    }

    /// One tick of the speed slider.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        let command = LevelCommand::change_speed(&self.level, speed);
        self.invoker.execute(command, &mut self.level)
    }

    /// One tick of a corner drag. Consecutive ticks on the same corner
    /// collapse into one history entry.
    pub fn drag_corner(&mut self, index: usize, to: Corner) -> bool {
        match LevelCommand::move_corner(&self.level, index, to) {
            Ok(command) => self.invoker.execute(command, &mut self.level),
            Err(err) => {
                log::debug!("Cannot drag: {err}");
                false
            }
        }
    }

    /// Adds a corner, retracting it if it lands too close to a neighbour.
    pub fn add_corner(&mut self, index: usize, corner: Corner) -> bool {
        self.invoker
            .execute(LevelCommand::add_corner(index, corner), &mut self.level)
            && self.validate_corners()
    }

    pub fn remove_corner(&mut self, index: usize) -> bool {
        self.invoker
            .execute(LevelCommand::remove_corner(index), &mut self.level)
    }

    /// Appends several corners as one undo step.
    pub fn add_corners(&mut self, corners: &[Corner]) -> bool {
        let start = self.level.corners.len();
        let commands = corners
            .iter()
            .enumerate()
            .map(|(offset, corner)| LevelCommand::add_corner(start + offset, *corner));
        let all = self
            .invoker
            .execute_all(commands, &mut self.level, true, false);
        if !all {
            self.invoker.retract_last(&mut self.level);
            return false;
        }
        self.validate_corners()
    }

    /// Replaces the whole border in a single entry.
    pub fn replace_corners(&mut self, corners: &[Corner]) -> bool {
        let mut batch = Sequence::new("Replace corners");
        for index in (0..self.level.corners.len()).rev() {
            batch.push(LevelCommand::remove_corner(index));
        }
        for (index, corner) in corners.iter().enumerate() {
            batch.push(LevelCommand::add_corner(index, *corner));
        }
        self.invoker
            .execute(LevelCommand::Batch(batch), &mut self.level)
            && self.validate_corners()
    }

    /// Marks the start of a tool session.
    pub fn begin_tool(&mut self, name: &str) {
        self.invoker.push_delimiter(Delimiter::named(name));
    }

    /// Reverts everything done since [`begin_tool`](Self::begin_tool).
    pub fn cancel_tool(&mut self, name: &str) -> usize {
        let undone = self
            .invoker
            .undo_to_delimiter_with(name, &mut self.level, false);
        self.invoker.clear_redo();
        undone
    }

    pub fn undo(&mut self) -> usize {
        self.invoker.undo(&mut self.level)
    }

    pub fn redo(&mut self) -> usize {
        self.invoker.redo(&mut self.level)
    }

    fn validate_corners(&mut self) -> bool {
        if !self.level.has_close_corners() {
            return true;
        }
        let retracted = self.invoker.retract_last(&mut self.level);
        log::info!("Corners too close, retracted {retracted} edit(s)");
        false
    }
}

impl Default for LevelEditor {
    fn default() -> Self {
        Self::new(InvokerConfig::default())
    }
}
