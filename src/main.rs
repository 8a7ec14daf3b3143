use clap::Parser;

use maze_walk::config::{DEFAULT_OPEN_PROBABILITY, DEFAULT_SIZE, MazeConfig};
use maze_walk::engine::error::MazeError;
use maze_walk::engine::game_loop::{banner, run_plain, run_tui};
use maze_walk::engine::world::World;
use maze_walk::map::generator::generate_connected;
use maze_walk::map::search::SearchStrategy;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Backtracking search gets slow once this many cells are expected open.
const BACKTRACKING_SOFT_LIMIT: f64 = 30.0;

/// Random maze on a square grid: find your way from the entrance (2) to the exit (8).
#[derive(Parser, Debug)]
#[command(name = "maze-walk")]
#[command(about = "Generate a random grid maze and walk it from entrance to exit", long_about = None)]
struct Args {
    /// Side length of the square grid
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Probability that a generated cell is open
    #[arg(long, default_value_t = DEFAULT_OPEN_PROBABILITY)]
    open_probability: f64,

    /// Seed for maze generation (random if not provided)
    #[arg(long)]
    seed: Option<u64>,

    /// Search used for the connectivity check
    #[arg(long, value_enum, default_value_t = SearchStrategy::FloodFill)]
    strategy: SearchStrategy,

    /// Read moves line by line from stdin instead of the full-screen view
    #[arg(long)]
    plain: bool,

    /// Re-roll the maze until the exit is reachable
    #[arg(long)]
    regenerate_until_connected: bool,

    /// Attempts allowed for --regenerate-until-connected
    #[arg(long, default_value_t = 100)]
    max_attempts: usize,
}

impl Args {
    fn config(&self) -> MazeConfig {
        MazeConfig {
            size: self.size,
            open_probability: self.open_probability,
            seed: self.seed,
            strategy: self.strategy,
        }
    }
}

fn main() -> Result<(), MazeError> {
    let args = Args::parse();

    // stderr keeps the full-screen view clean; RUST_LOG overrides the level.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let config = args.config();
    config.validate()?;

    let expected_open = (config.size * config.size) as f64 * config.open_probability;
    if config.strategy == SearchStrategy::Backtracking && expected_open > BACKTRACKING_SOFT_LIMIT {
        tracing::warn!(
            size = config.size,
            expected_open,
            "backtracking search may take very long on open grids, consider --strategy flood-fill"
        );
    }

    let seed = config.resolve_seed();
    let mut world = if args.regenerate_until_connected {
        let (maze, attempts) = generate_connected(&config, seed, args.max_attempts)?;
        tracing::info!(attempts, connected = maze.connected, "maze ready");
        World::new(maze, seed)
    } else {
        World::generate(&config, seed)?
    };

    let outcome = if args.plain {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        run_plain(&mut world, stdin.lock(), &mut stdout)?
    } else {
        let outcome = run_tui(&mut world)?;
        println!("Seed: {seed}");
        println!(
            "entrance: {}, exit: {}, connected: {}",
            world.entrance,
            world.exit,
            if world.connected { "yes" } else { "no" }
        );
        println!("{}", banner(outcome));
        outcome
    };

    tracing::info!(?outcome, seed, "session finished");
    Ok(())
}
