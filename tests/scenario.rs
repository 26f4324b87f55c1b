use std::time::Duration;

use snake_core::config::{ConfigError, GameConfig, GridSize, SpeedTier};
use snake_core::game::{GameEvent, GameState, GameStatus};
use snake_core::grid::Position;
use snake_core::input::Direction;
use snake_core::maps::{MapCatalog, MapData, Rgb};
use snake_core::snake::Snake;

fn pos(x: i32, y: i32) -> Position {
    Position { x, y }
}

fn state_at_speed(speed: SpeedTier, seed: u64) -> GameState {
    let config = GameConfig {
        speed,
        ..GameConfig::default()
    };
    GameState::new_with_seed(&config, &MapCatalog::builtin(), seed)
        .expect("default config should build")
}

#[test]
fn head_into_own_second_segment_is_terminal() {
    let mut state = state_at_speed(SpeedTier::Normal, 42);
    state.snake = Snake::from_trail(
        pos(5, 5),
        Direction::Right,
        &[
            (pos(4, 5), Direction::Right),
            (pos(5, 6), Direction::Down),
            (pos(6, 6), Direction::Left),
        ],
    );
    state.steer(Direction::Up);

    state.tick();

    assert_eq!(state.status, GameStatus::Dead);
    assert_eq!(state.snake.head(), pos(5, 6));
    assert!(state.take_events().contains(&GameEvent::GameOver));

    // Dead is terminal: neither direct ticks nor elapsed time move it.
    let ticks = state.tick_count();
    state.tick();
    state.advance(Duration::from_secs(3));
    assert_eq!(state.snake.head(), pos(5, 6));
    assert_eq!(state.tick_count(), ticks);
}

#[test]
fn stepwise_food_collection_and_wrap_around() {
    let mut state = state_at_speed(SpeedTier::Normal, 42);
    state.snake = Snake::new(pos(14, 3), Direction::Right);
    state.grid_mut().set_food(pos(15, 3));
    state.steer(Direction::Right);

    state.tick();
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.head(), pos(15, 3));

    // Right edge wraps to column zero instead of killing the snake.
    state.tick();
    assert_eq!(state.snake.head(), pos(0, 3));
    assert_eq!(state.status, GameStatus::Alive);

    state.steer(Direction::Up);
    state.tick();
    assert_eq!(state.snake.head(), pos(0, 4));
    assert_eq!(state.status, GameStatus::Alive);
}

#[test]
fn growth_arrives_one_real_second_after_eating() {
    let mut state = state_at_speed(SpeedTier::Normal, 9);
    state.snake = Snake::new(pos(1, 1), Direction::Right);
    state.grid_mut().set_food(pos(2, 1));
    state.steer(Direction::Right);

    let frame = Duration::from_millis(16);
    let mut eaten_at = None;
    let mut eaten_ticks = 0;
    let mut grown_at = None;
    let mut grown_ticks = 0;

    for _ in 0..250 {
        state.advance(frame);
        for event in state.take_events() {
            match event {
                GameEvent::FoodEaten { .. } if eaten_at.is_none() => {
                    eaten_at = Some(state.now());
                    eaten_ticks = state.tick_count();
                }
                GameEvent::SegmentGrown if grown_at.is_none() => {
                    grown_at = Some(state.now());
                    grown_ticks = state.tick_count();
                }
                _ => {}
            }
        }
        if grown_at.is_some() {
            break;
        }
    }

    let eaten_at = eaten_at.expect("food directly ahead is eaten on the first tick");
    let grown_at = grown_at.expect("growth must land within the simulated window");

    // One real second, give or take the 16ms frame quantization.
    let delay = grown_at - eaten_at;
    assert!(
        delay >= Duration::from_millis(984) && delay <= Duration::from_millis(1016),
        "growth delay was {delay:?}"
    );

    // At 150ms per tick, 6-7 ticks pass while the effect is pending.
    let ticks_between = grown_ticks - eaten_ticks;
    assert!(
        (6..=7).contains(&ticks_between),
        "expected 6-7 ticks in the growth window, got {ticks_between}"
    );
    assert_eq!(state.snake.body_size(), 1);
}

#[test]
fn food_reappears_before_the_body_grows() {
    let mut state = state_at_speed(SpeedTier::Normal, 3);
    state.snake = Snake::new(pos(1, 1), Direction::Right);
    state.grid_mut().set_food(pos(2, 1));
    state.steer(Direction::Right);

    state.tick();

    // Same-tick respawn; the growth effect is still a second away.
    assert!(state.food_position().is_some());
    assert_ne!(state.food_position(), Some(pos(2, 1)));
    assert_eq!(state.snake.body_size(), 0);
}

#[test]
fn score_tiers_follow_the_tick_interval() {
    for (speed, expected) in [
        (SpeedTier::Slow, 5),
        (SpeedTier::Normal, 10),
        (SpeedTier::Fast, 20),
    ] {
        let mut state = state_at_speed(speed, 21);
        state.snake = Snake::new(pos(1, 1), Direction::Right);
        state.grid_mut().set_food(pos(2, 1));
        state.steer(Direction::Right);

        state.tick();

        assert_eq!(state.score, expected, "wrong award at {speed:?}");
        assert!(
            state
                .take_events()
                .contains(&GameEvent::FoodEaten { points: expected })
        );
    }
}

#[test]
fn packed_board_reports_board_full_instead_of_crashing() {
    let mut catalog = MapCatalog::builtin();
    let mut obstacles = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            // Leave only the spawn cell and the one to its right free.
            if !(y == 2 && (x == 2 || x == 3)) {
                obstacles.push(pos(x, y));
            }
        }
    }
    catalog.insert(
        "packed",
        MapData {
            obstacles,
            background: Rgb { r: 0, g: 0, b: 0 },
        },
    );

    let config = GameConfig {
        grid: GridSize {
            width: 4,
            height: 4,
        },
        map: "packed".to_owned(),
        ..GameConfig::default()
    };
    let mut state = GameState::new_with_seed(&config, &catalog, 5).unwrap();

    // The sole free non-snake cell must have received the food.
    assert_eq!(state.food_position(), Some(pos(3, 2)));

    state.steer(Direction::Right);
    state.tick();

    let events = state.take_events();
    assert!(events.contains(&GameEvent::FoodEaten { points: 10 }));
    assert!(events.contains(&GameEvent::BoardFull));
    assert_eq!(state.food_position(), None);
    // Unwinnable, not dead: the snake itself hit nothing.
    assert_eq!(state.status, GameStatus::Alive);
}

#[test]
fn growth_pending_at_death_is_discarded() {
    let mut state = state_at_speed(SpeedTier::Normal, 13);
    state.snake = Snake::new(pos(1, 1), Direction::Right);
    state.grid_mut().set_food(pos(2, 1));
    state.grid_mut().add_obstacle(pos(3, 1));
    state.steer(Direction::Right);

    // Tick one eats; tick two hits the obstacle 850ms before the growth
    // continuation would land.
    state.advance(Duration::from_millis(150));
    assert_eq!(state.score, 10);
    state.advance(Duration::from_millis(150));
    assert_eq!(state.status, GameStatus::Dead);

    state.advance(Duration::from_secs(2));

    assert_eq!(state.snake.body_size(), 0);
    assert!(!state.take_events().contains(&GameEvent::SegmentGrown));
}

#[test]
fn custom_json_catalog_plays_end_to_end() {
    let raw = r#"{
        "walled": {
            "obstacles": [
                {"x": 10, "y": 8},
                {"x": 10, "y": 9}
            ],
            "background": {"r": 12, "g": 40, "b": 60}
        }
    }"#;
    let catalog = MapCatalog::from_json_str(raw).unwrap();
    let config = GameConfig {
        map: "walled".to_owned(),
        ..GameConfig::default()
    };

    let mut state = GameState::new_with_seed(&config, &catalog, 77).unwrap();
    state.steer(Direction::Right);

    // Two cells from the center spawn to the wall at x=10.
    state.tick();
    assert_eq!(state.status, GameStatus::Alive);
    state.tick();
    assert_eq!(state.status, GameStatus::Dead);
    assert!(state.take_events().contains(&GameEvent::GameOver));
}

#[test]
fn unknown_map_selection_fails_at_startup() {
    let config = GameConfig {
        map: "atlantis".to_owned(),
        ..GameConfig::default()
    };

    let error = GameState::new_with_seed(&config, &MapCatalog::builtin(), 1).unwrap_err();
    assert_eq!(error, ConfigError::UnknownMap {
        name: "atlantis".to_owned()
    });
}
