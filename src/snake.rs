use crate::grid::{Grid, Position};
use crate::history::{BodySegment, MoveHistory};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state: head, heading, and the trailing movement history.
///
/// The body is not stored as cells of its own; segment placement is derived
/// from the history chain, one entry per segment, so positions and turn
/// angles always agree with the path the head actually took.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    heading: Direction,
    pending: Direction,
    body_size: usize,
    history: MoveHistory,
}

impl Snake {
    /// Creates a zero-length snake at `start` facing `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            head: start,
            heading: direction,
            pending: direction,
            body_size: 0,
            history: MoveHistory::new(start, direction),
        }
    }

    /// Creates a mid-game snake from an explicit trail.
    ///
    /// `trail` lists the cells behind the head, nearest first, each with
    /// the direction that step was taken in. Body size equals the trail
    /// length. Mirrors scripted-scenario setup in tests.
    #[must_use]
    pub fn from_trail(head: Position, heading: Direction, trail: &[(Position, Direction)]) -> Self {
        let mut oldest_first = trail.iter().rev();
        let history = match oldest_first.next() {
            Some(&(position, direction)) => {
                let mut history = MoveHistory::new(position, direction);
                for &(position, direction) in oldest_first {
                    history.record(position, direction);
                }
                history
            }
            None => MoveHistory::new(head, heading),
        };

        Self {
            head,
            heading,
            pending: heading,
            body_size: trail.len(),
            history,
        }
    }

    /// Requests a direction change for the next tick.
    ///
    /// Rejected (returning false) when it would reverse the heading applied
    /// on the last completed tick; the pending direction is otherwise
    /// overwritten, so the last accepted input before a tick wins.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.heading, direction) {
            return false;
        }

        self.pending = direction;
        true
    }

    /// Advances one cell in the pending direction, wrapping at the edges.
    ///
    /// The vacated head cell is recorded in the history (trimmed first so
    /// the chain stays within body size + 1 entries), then the pending
    /// direction becomes the applied heading.
    pub fn step(&mut self, grid: &Grid) {
        self.history.trim(self.body_size);
        self.history.record(self.head, self.pending);

        self.heading = self.pending;
        self.head = grid.validate(self.head.stepped(self.heading));
    }

    /// Adds one body segment (the deferred growth effect landing).
    pub fn grow(&mut self) {
        self.body_size += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Returns the direction applied on the last completed tick.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the number of trailing body segments.
    #[must_use]
    pub fn body_size(&self) -> usize {
        self.body_size
    }

    /// Returns the movement history backing segment placement.
    #[must_use]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Every cell the snake covers: the head plus the full recorded trail.
    ///
    /// This is the exclusion set for food placement, which deliberately
    /// covers the whole history window rather than just the live segments.
    #[must_use]
    pub fn cells(&self) -> Vec<Position> {
        let mut cells = Vec::with_capacity(1 + self.history.len());
        cells.push(self.head);
        cells.extend(self.history.positions());
        cells
    }

    /// Returns true if the head or any trail cell covers `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.history.positions().any(|cell| cell == position)
    }

    /// Cells occupied by live body segments, the self-collision set.
    ///
    /// Only the first `body_size` history entries count; the spare tail
    /// entry kept for interpolation is not a collidable segment.
    pub fn body_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.history.positions().take(self.body_size)
    }

    /// Derives renderable segments from the history chain.
    ///
    /// Segment `i` takes history entry `i`, clamped to the oldest entry
    /// during the brief window after growth before the chain catches up.
    #[must_use]
    pub fn body_segments(&self) -> Vec<BodySegment> {
        (0..self.body_size)
            .filter_map(|index| self.history.segment_clamped(index))
            .map(|entry| BodySegment {
                position: entry.position,
                direction: entry.direction,
                angle: entry.turn_angle(),
            })
            .collect()
    }
}
