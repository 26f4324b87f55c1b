use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns the neighboring position one cell along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Failure modes of grid occupancy operations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    /// Every cell is taken; food has nowhere to go. The board is in a
    /// degenerate, unwinnable state rather than a crashed one.
    #[error("no unoccupied cell left on the {width}x{height} board")]
    BoardFull { width: u16, height: u16 },
}

/// Bounded toroidal playing field owning obstacle and food occupancy.
///
/// Created once per level. Obstacles are seeded from the map catalog at
/// level start and never removed; the food cell mutates every time food is
/// eaten. The snake's own cells are not tracked here - callers pass them in
/// when spawning food, which keeps the grid free of back-references and is
/// cheap at these board sizes.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    obstacles: HashSet<Position>,
    food: Option<Position>,
}

impl Grid {
    /// Creates an empty grid of the given size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            obstacles: HashSet::new(),
            food: None,
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Wraps an arbitrary position into bounds (toroidal topology).
    ///
    /// Out-of-range coordinates wrap to the opposite edge; nothing is
    /// clamped.
    #[must_use]
    pub fn validate(&self, position: Position) -> Position {
        position.wrapped(self.size)
    }

    /// Marks a cell permanently occupied for the life of the level.
    /// Duplicate calls are idempotent.
    pub fn add_obstacle(&mut self, position: Position) {
        self.obstacles.insert(position);
    }

    /// Returns true if the cell holds an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// Returns true if the cell holds an obstacle or the current food.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.obstacles.contains(&position) || self.food == Some(position)
    }

    /// Returns the number of obstacle cells.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Returns the current food cell, if any.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Places food at an explicit cell, replacing any current food.
    ///
    /// Scripted-scenario support; normal play goes through [`spawn_food`].
    ///
    /// [`spawn_food`]: Grid::spawn_food
    pub fn set_food(&mut self, position: Position) {
        self.food = Some(position);
    }

    /// Removes the current food cell (called when it is consumed).
    pub fn release_food(&mut self) {
        self.food = None;
    }

    /// Spawns food on a cell chosen uniformly among all unoccupied cells.
    ///
    /// `blocked` carries the snake's cells (head plus trail), which the
    /// grid does not track itself. The full board is enumerated and
    /// filtered, so an impossible board reports [`GridError::BoardFull`]
    /// instead of sampling forever.
    pub fn spawn_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        blocked: &[Position],
    ) -> Result<Position, GridError> {
        let mut candidates = Vec::new();
        for y in 0..i32::from(self.size.height) {
            for x in 0..i32::from(self.size.width) {
                let position = Position { x, y };
                if !self.is_occupied(position) && !blocked.contains(&position) {
                    candidates.push(position);
                }
            }
        }

        if candidates.is_empty() {
            return Err(GridError::BoardFull {
                width: self.size.width,
                height: self.size.height,
            });
        }

        let position = candidates[rng.gen_range(0..candidates.len())];
        self.food = Some(position);
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;

    use super::{Grid, GridError, Position};

    fn grid_16() -> Grid {
        Grid::new(GridSize {
            width: 16,
            height: 16,
        })
    }

    #[test]
    fn positions_wrap_to_the_opposite_edge() {
        let grid = grid_16();

        assert_eq!(
            grid.validate(Position { x: 16, y: 3 }),
            Position { x: 0, y: 3 }
        );
        assert_eq!(
            grid.validate(Position { x: -1, y: 3 }),
            Position { x: 15, y: 3 }
        );
        assert_eq!(
            grid.validate(Position { x: 5, y: 16 }),
            Position { x: 5, y: 0 }
        );
        assert_eq!(
            grid.validate(Position { x: 5, y: -1 }),
            Position { x: 5, y: 15 }
        );
    }

    #[test]
    fn wrapping_handles_far_out_of_range_values() {
        let grid = grid_16();

        assert_eq!(
            grid.validate(Position { x: 35, y: -20 }),
            Position { x: 3, y: 12 }
        );
    }

    #[test]
    fn obstacles_are_idempotent() {
        let mut grid = grid_16();
        let cell = Position { x: 5, y: 5 };

        grid.add_obstacle(cell);
        grid.add_obstacle(cell);

        assert_eq!(grid.obstacle_count(), 1);
        assert!(grid.is_obstacle(cell));
        assert!(grid.is_occupied(cell));
    }

    #[test]
    fn food_cell_counts_as_occupied_until_released() {
        let mut grid = grid_16();
        let cell = Position { x: 2, y: 9 };

        grid.set_food(cell);
        assert!(grid.is_occupied(cell));
        assert!(!grid.is_obstacle(cell));

        grid.release_food();
        assert!(!grid.is_occupied(cell));
        assert_eq!(grid.food(), None);
    }

    #[test]
    fn spawned_food_avoids_obstacles_and_blocked_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = grid_16();
        grid.add_obstacle(Position { x: 0, y: 0 });
        grid.add_obstacle(Position { x: 1, y: 0 });
        let snake_cells = [
            Position { x: 2, y: 0 },
            Position { x: 3, y: 0 },
            Position { x: 4, y: 0 },
        ];

        for _ in 0..100 {
            grid.release_food();
            let food = grid
                .spawn_food(&mut rng, &snake_cells)
                .expect("open board must have room for food");

            assert!(!grid.is_obstacle(food));
            assert!(!snake_cells.contains(&food));
        }
    }

    #[test]
    fn spawn_on_full_board_reports_board_full() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = Grid::new(GridSize {
            width: 2,
            height: 2,
        });
        for y in 0..2 {
            for x in 0..2 {
                grid.add_obstacle(Position { x, y });
            }
        }

        assert_eq!(
            grid.spawn_food(&mut rng, &[]),
            Err(GridError::BoardFull {
                width: 2,
                height: 2
            })
        );
        assert_eq!(grid.food(), None);
    }
}
