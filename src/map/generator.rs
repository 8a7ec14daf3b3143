use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MazeConfig;
use crate::engine::error::MazeError;
use crate::map::{Grid, Position, tile::Cell};

/// A freshly generated maze and whether its exit can be reached.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub entrance: Position,
    pub exit: Position,
    pub connected: bool,
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Position {
    Position::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// Fill every cell open with `config.open_probability`, then stamp a random
/// entrance and a distinct random exit over whatever the fill produced.
pub fn generate<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<GeneratedMaze, MazeError> {
    config.validate()?;
    let size = config.size;

    let entrance = random_position(rng, size);
    let mut exit = random_position(rng, size);
    while exit == entrance {
        exit = random_position(rng, size);
    }

    let mut grid = Grid::new(size, Cell::Blocked);
    for cell in grid.cells.iter_mut() {
        if rng.gen_bool(config.open_probability) {
            *cell = Cell::Open;
        }
    }
    grid.set(entrance, Cell::Entrance);
    grid.set(exit, Cell::Exit);

    let connected = config.strategy.reachable(&grid, entrance, exit);

    tracing::debug!(
        size,
        open = grid.count(Cell::Open),
        %entrance,
        %exit,
        connected,
        "maze generated"
    );

    Ok(GeneratedMaze {
        grid,
        entrance,
        exit,
        connected,
    })
}

pub fn generate_seeded(config: &MazeConfig, seed: u64) -> Result<GeneratedMaze, MazeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// Seed for the `attempt`-th re-roll. Wraps instead of overflowing.
pub fn derived_seed(seed: u64, attempt: usize) -> u64 {
    seed.wrapping_add((attempt as u64).wrapping_mul(9_973))
}

/// Re-rolls with derived seeds until a connected maze comes up or
/// `max_attempts` is spent. Returns the last maze generated and the number
/// of attempts used.
pub fn generate_connected(
    config: &MazeConfig,
    seed: u64,
    max_attempts: usize,
) -> Result<(GeneratedMaze, usize), MazeError> {
    let attempts = max_attempts.max(1);
    let mut last = None;
    for attempt in 0..attempts {
        let sub_seed = derived_seed(seed, attempt);
        let maze = generate_seeded(config, sub_seed)?;
        if maze.connected {
            tracing::info!(attempt = attempt + 1, sub_seed, "connected maze found");
            return Ok((maze, attempt + 1));
        }
        last = Some(maze);
    }
    tracing::warn!(attempts, "no connected maze found");
    match last {
        Some(maze) => Ok((maze, attempts)),
        None => generate_seeded(config, seed).map(|m| (m, attempts)),
    }
}
