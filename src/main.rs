use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use snake_core::config::{ConfigError, GameConfig, GridSize, SkinSelection, SpeedTier};
use snake_core::game::{GameEvent, GameState, GameStatus};
use snake_core::input::Direction;
use snake_core::maps::MapCatalog;

/// Headless driver playing a seeded random-walk session.
///
/// Stands in for the presentation layer: it supplies the configuration,
/// steers the snake, and prints every simulation event.
#[derive(Debug, Parser)]
#[command(name = "snake-core")]
struct Cli {
    /// Map to play on (built-in: cross, open, pillars).
    #[arg(long, default_value = "open")]
    map: String,

    /// Speed tier: slow, normal, or fast.
    #[arg(long, default_value = "normal", value_parser = parse_speed)]
    speed: SpeedTier,

    /// RNG seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to play before giving up.
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Chance per tick that the driver steers to a random side.
    #[arg(long, default_value_t = 0.35)]
    turn_chance: f64,

    /// JSON file with extra maps (name -> { obstacles, background }),
    /// merged over the built-in catalog.
    #[arg(long)]
    maps_file: Option<PathBuf>,

    /// Skin identifiers forwarded to the presentation layer.
    #[arg(long, default_value = "classic")]
    head_skin: String,
    #[arg(long, default_value = "classic")]
    body_skin: String,
    #[arg(long, default_value = "classic")]
    tail_skin: String,
    #[arg(long, default_value = "classic")]
    food_skin: String,
}

fn parse_speed(raw: &str) -> Result<SpeedTier, ConfigError> {
    raw.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut catalog = MapCatalog::builtin();
    if let Some(path) = &cli.maps_file {
        let extra = MapCatalog::from_json_str(&fs::read_to_string(path)?)?;
        for name in extra.names() {
            if let Some(map) = extra.get(name) {
                catalog.insert(name, map.clone());
            }
        }
    }

    let config = GameConfig {
        grid: GridSize::default(),
        speed: cli.speed,
        map: cli.map.clone(),
        skins: SkinSelection {
            head: cli.head_skin.clone(),
            body: cli.body_skin.clone(),
            tail: cli.tail_skin.clone(),
            food: cli.food_skin.clone(),
        },
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new_with_seed(&config, &catalog, seed)?;

    if let Some(map) = catalog.get(&config.map) {
        println!(
            "map '{}': {} obstacles, backdrop #{:02x}{:02x}{:02x}",
            config.map,
            map.obstacles.len(),
            map.background.r,
            map.background.g,
            map.background.b,
        );
    }
    println!(
        "speed {:?} ({}ms/tick), seed {seed}",
        cli.speed,
        state.tick_interval().as_millis()
    );

    let mut driver_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let turn_chance = cli.turn_chance.clamp(0.0, 1.0);
    state.steer(Direction::Right);

    let frame = Duration::from_millis(16);
    let time_limit = Duration::from_secs_f64(cli.seconds.max(0.0));

    while state.now() < time_limit {
        let ticks_before = state.tick_count();
        state.advance(frame);

        // Steer at tick granularity, not frame granularity, so the walk
        // changes course about `turn_chance` of the cells it visits.
        if state.tick_count() > ticks_before && driver_rng.gen_bool(turn_chance) {
            let sides = state.snake.heading().perpendicular();
            state.steer(sides[driver_rng.gen_range(0..sides.len())]);
        }

        for event in state.take_events() {
            report(&state, event);
        }

        if state.status == GameStatus::Dead {
            break;
        }
    }

    println!(
        "final score {} after {} ticks ({:.2}s simulated)",
        state.score,
        state.tick_count(),
        state.now().as_secs_f64(),
    );
    Ok(())
}

fn report(state: &GameState, event: GameEvent) {
    let stamp = state.now().as_secs_f64();
    match event {
        GameEvent::FoodEaten { points } => println!("[{stamp:7.3}s] ate food (+{points})"),
        GameEvent::FoodSpawned { position } => {
            println!("[{stamp:7.3}s] food at ({}, {})", position.x, position.y);
        }
        GameEvent::SegmentGrown => {
            println!(
                "[{stamp:7.3}s] body grew to {} segments",
                state.snake.body_size()
            );
        }
        GameEvent::GameOver => println!("[{stamp:7.3}s] game over"),
        GameEvent::BoardFull => println!("[{stamp:7.3}s] board full; nowhere to spawn food"),
    }
}
