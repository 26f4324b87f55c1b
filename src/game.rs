use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, GROWTH_DELAY, GameConfig};
use crate::grid::{Grid, Position};
use crate::history::{BodySegment, heading_angle};
use crate::input::Direction;
use crate::maps::MapCatalog;
use crate::score::points_for_interval;
use crate::snake::Snake;
use crate::timing::{GrowthTimer, TickClock};

/// Snake life state. `Dead` is terminal: no tick is processed after it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Alive,
    Dead,
}

/// Facts the simulation reports to its caller, drained per update.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    /// Food was consumed; `points` is the tier-dependent score delta.
    FoodEaten { points: u32 },
    /// Replacement food landed on the given cell.
    FoodSpawned { position: Position },
    /// A deferred growth effect landed; the body is one segment longer.
    SegmentGrown,
    /// The snake hit itself or an obstacle. Terminal.
    GameOver,
    /// No unoccupied cell remained for food; the round is unwinnable.
    BoardFull,
}

/// Complete simulation state for one level.
///
/// A fixed-rate tick drives all state transitions on a single logical
/// thread; the deferred growth continuation is serialized onto the same
/// [`advance`] loop, so body size only ever changes between ticks.
/// Discarding the instance is the only teardown.
///
/// [`advance`]: GameState::advance
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub score: u32,
    pub status: GameStatus,
    grid: Grid,
    paused: bool,
    tick_count: u64,
    now: Duration,
    clock: TickClock,
    growth: GrowthTimer,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Builds a session from validated configuration and a map catalog.
    ///
    /// Fails fast on configuration problems (missing selections, unknown
    /// map) so a broken setup never reaches its first tick.
    pub fn new(config: &GameConfig, catalog: &MapCatalog) -> Result<Self, ConfigError> {
        Self::build(config, catalog, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible simulations.
    pub fn new_with_seed(
        config: &GameConfig,
        catalog: &MapCatalog,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(config, catalog, StdRng::seed_from_u64(seed))
    }

    fn build(config: &GameConfig, catalog: &MapCatalog, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = catalog
            .get(&config.map)
            .ok_or_else(|| ConfigError::UnknownMap {
                name: config.map.clone(),
            })?;

        let mut grid = Grid::new(config.grid);
        map.apply(&mut grid);

        let start = Position {
            x: i32::from(config.grid.width / 2),
            y: i32::from(config.grid.height / 2),
        };
        let snake = Snake::new(start, Direction::Right);
        let interval = config.speed.tick_interval();

        let mut state = Self {
            snake,
            score: 0,
            status: GameStatus::Alive,
            grid,
            paused: true,
            tick_count: 0,
            now: Duration::ZERO,
            clock: TickClock::new(interval),
            growth: GrowthTimer::new(),
            rng,
            events: Vec::new(),
        };
        state.respawn_food();
        Ok(state)
    }

    /// Requests a direction change, last-accepted-wins per tick.
    ///
    /// Reversals of the applied heading are rejected. The first accepted
    /// steer also starts the simulation: it holds still until the player
    /// has picked a direction.
    pub fn steer(&mut self, direction: Direction) {
        if self.status == GameStatus::Dead {
            return;
        }

        if self.snake.steer(direction) {
            self.paused = false;
        }
    }

    /// Pauses or resumes ticking; growth continuations keep their
    /// real-time deadlines either way.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advances the simulation clock by `delta` of real time.
    ///
    /// Accumulated time in excess of the tick interval carries over, so
    /// irregular caller cadence never drops simulation time. Growth
    /// continuations and ticks are interleaved in chronological order.
    pub fn advance(&mut self, delta: Duration) {
        let mut remaining = delta;
        while !remaining.is_zero() {
            let mut step = remaining;
            if self.is_running() {
                step = step.min(self.clock.until_next_tick());
            }
            if let Some(due) = self.growth.next_due() {
                step = step.min(due.saturating_sub(self.now));
            }

            self.now += step;
            remaining -= step;

            while self.growth.pop_due(self.now) {
                self.snake.grow();
                self.events.push(GameEvent::SegmentGrown);
            }

            if self.is_running() {
                for _ in 0..self.clock.advance(step) {
                    self.tick();
                }
            }
        }
    }

    /// Executes exactly one simulation tick.
    ///
    /// A no-op once dead or while paused; the terminal state guards all
    /// mutation, so late calls are silently ignored rather than raised.
    pub fn tick(&mut self) {
        if self.status == GameStatus::Dead || self.paused {
            return;
        }

        self.tick_count += 1;
        self.snake.step(&self.grid);

        let head = self.snake.head();
        if self.grid.food() == Some(head) {
            self.consume_food();
        }

        if self.head_collided(head) {
            self.status = GameStatus::Dead;
            // A growth effect landing after death would mutate terminal
            // state; pending continuations die with the snake.
            self.growth.clear();
            self.events.push(GameEvent::GameOver);
        }
    }

    fn consume_food(&mut self) {
        let points = points_for_interval(self.clock.interval());
        self.score += points;
        self.events.push(GameEvent::FoodEaten { points });

        self.growth.schedule(self.now + GROWTH_DELAY);

        // The visible body lags by the growth delay, but the board never
        // goes foodless: the replacement appears on the same tick.
        self.grid.release_food();
        self.respawn_food();
    }

    fn respawn_food(&mut self) {
        let blocked = self.snake.cells();
        match self.grid.spawn_food(&mut self.rng, &blocked) {
            Ok(position) => self.events.push(GameEvent::FoodSpawned { position }),
            Err(_) => self.events.push(GameEvent::BoardFull),
        }
    }

    fn head_collided(&self, head: Position) -> bool {
        self.snake.body_cells().any(|cell| cell == head) || self.grid.is_obstacle(head)
    }

    /// Returns true when ticks are being processed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Alive && !self.paused
    }

    /// Returns true while waiting for input or explicitly paused.
    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Returns the playing field.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for scripted scenarios (placing food, extra
    /// obstacles). Normal play never needs this.
    #[must_use]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns total simulated time consumed by [`advance`].
    ///
    /// [`advance`]: GameState::advance
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the fixed tick interval for this session.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Current food cell, if the board still has room for one.
    #[must_use]
    pub fn food_position(&self) -> Option<Position> {
        self.grid.food()
    }

    /// Head render angle in degrees.
    #[must_use]
    pub fn head_angle(&self) -> f32 {
        heading_angle(self.snake.heading())
    }

    /// Renderable body segments, head-adjacent first.
    #[must_use]
    pub fn body_segments(&self) -> Vec<BodySegment> {
        self.snake.body_segments()
    }

    /// Drains and returns events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
