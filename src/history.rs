use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::Direction;

/// One step of movement history: where the head was and which way it went.
///
/// `previous_direction` is the direction of the step recorded just before
/// this one, so a segment can tell a straight run from a corner. The first
/// entry of a fresh history has no predecessor and defaults to `Right`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MovePosition {
    pub position: Position,
    pub direction: Direction,
    pub previous_direction: Direction,
}

impl MovePosition {
    /// Returns the render angle in degrees for a body segment at this step.
    ///
    /// A fixed lookup keyed on (direction, previous direction): straight
    /// runs use one of four axis angles, corners use the 45-degree-offset
    /// values that select the curved joint sprite.
    #[must_use]
    pub fn turn_angle(&self) -> f32 {
        match (self.direction, self.previous_direction) {
            (Direction::Right, Direction::Down) => 45.0,
            (Direction::Right, Direction::Up) => 135.0,
            (Direction::Right, _) => 90.0,
            (Direction::Left, Direction::Down) => -45.0,
            (Direction::Left, Direction::Up) => 225.0,
            (Direction::Left, _) => -90.0,
            (Direction::Up, Direction::Left) => 225.0,
            (Direction::Up, Direction::Right) => 135.0,
            (Direction::Up, _) => 180.0,
            (Direction::Down, Direction::Left) => -45.0,
            (Direction::Down, Direction::Right) => 45.0,
            (Direction::Down, _) => 0.0,
        }
    }
}

/// Returns the render angle in degrees for the head facing `direction`.
///
/// The direction vector's polar angle, rotated back 90 degrees so an
/// upward-facing sprite reads as angle zero.
#[must_use]
pub fn heading_angle(direction: Direction) -> f32 {
    match direction {
        Direction::Up => 0.0,
        Direction::Left => 90.0,
        Direction::Right => -90.0,
        Direction::Down => -180.0,
    }
}

/// A body segment as the renderer should place it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySegment {
    pub position: Position,
    pub direction: Direction,
    pub angle: f32,
}

/// Bounded record of past (position, direction) steps, newest first.
///
/// Entry 0 is the cell the head vacated on the latest tick, which is
/// exactly where the first body segment sits. The chain is trimmed before
/// every new record so it never holds more than body size + 1 entries.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    entries: VecDeque<MovePosition>,
}

impl MoveHistory {
    /// Creates a history whose single entry is the starting cell.
    #[must_use]
    pub fn new(position: Position, direction: Direction) -> Self {
        let mut entries = VecDeque::new();
        entries.push_front(MovePosition {
            position,
            direction,
            previous_direction: Direction::Right,
        });

        Self { entries }
    }

    /// Returns the number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no steps are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the oldest entries until at most `max_len` remain.
    ///
    /// Called with the current body size right before [`record`], keeping
    /// only the window the body still needs.
    ///
    /// [`record`]: MoveHistory::record
    pub fn trim(&mut self, max_len: usize) {
        while self.entries.len() > max_len {
            self.entries.pop_back();
        }
    }

    /// Prepends a new step. The previous direction is taken from the entry
    /// that was newest until now, defaulting to `Right` for the first one.
    pub fn record(&mut self, position: Position, direction: Direction) {
        let previous_direction = self
            .entries
            .front()
            .map_or(Direction::Right, |entry| entry.direction);

        self.entries.push_front(MovePosition {
            position,
            direction,
            previous_direction,
        });
    }

    /// Returns the step at `index` (0 = newest), or `None` past the end.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<MovePosition> {
        self.entries.get(index).copied()
    }

    /// Returns the step at `index`, clamped to the oldest available entry.
    ///
    /// Right after the body grows there is a short window where the chain
    /// has not caught up to the new body size; the extra segment rides on
    /// the tail entry until the next tick records a fresh step.
    #[must_use]
    pub fn segment_clamped(&self, index: usize) -> Option<MovePosition> {
        let last = self.entries.len().checked_sub(1)?;
        self.segment(index.min(last))
    }

    /// The cell a segment at `index` is moving from, for sub-tick
    /// interpolation between two steps. Falls back to the segment's own
    /// cell when no older step exists.
    #[must_use]
    pub fn previous_position(&self, index: usize) -> Option<Position> {
        let current = self.segment_clamped(index)?;
        Some(
            self.segment(index + 1)
                .map_or(current.position, |older| older.position),
        )
    }

    /// Iterates over recorded positions, newest first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(|entry| entry.position)
    }
}
