use crate::config::MazeConfig;
use crate::engine::action::{Action, Direction};
use crate::engine::error::{MazeError, MoveError};
use crate::map::generator::{GeneratedMaze, generate_seeded};
use crate::map::{Grid, Position, tile::Cell};

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Player has not reached the exit yet.
    Exploring,
    /// Player stands on the exit. Terminal.
    Arrived,
    /// Exit cannot be reached from the entrance; play never starts.
    Disconnected,
}

/// One play session: the maze, where the player is, and the message log.
pub struct World {
    pub grid: Grid,
    pub entrance: Position,
    pub exit: Position,
    pub player: Position,
    pub connected: bool,
    pub state: GameState,

    pub logs: VecDeque<String>,
    pub seed: u64,
    pub moves: usize,
    pub rejected: usize,
}

impl World {
    const MAX_LOGS: usize = 64;

    pub fn new(maze: GeneratedMaze, seed: u64) -> Self {
        let GeneratedMaze {
            grid,
            entrance,
            exit,
            connected,
        } = maze;

        let state = if connected {
            GameState::Exploring
        } else {
            GameState::Disconnected
        };

        let mut world = Self {
            grid,
            entrance,
            exit,
            player: entrance,
            connected,
            state,
            logs: VecDeque::new(),
            seed,
            moves: 0,
            rejected: 0,
        };

        world.push_log(format!("Seed: {seed}"));
        world.push_log(format!("Entrance: {entrance}, exit: {exit}"));
        if connected {
            world.push_log("Move with WASD or arrow keys. Reach the exit (8).");
        } else {
            world.push_log("The maze is not connected from entrance to exit.");
        }
        world
    }

    pub fn generate(config: &MazeConfig, seed: u64) -> Result<Self, MazeError> {
        let maze = generate_seeded(config, seed)?;
        tracing::info!(
            seed,
            size = config.size,
            entrance = %maze.entrance,
            exit = %maze.exit,
            connected = maze.connected,
            "session started"
        );
        Ok(Self::new(maze, seed))
    }

    pub fn is_arrived(&self) -> bool {
        self.state == GameState::Arrived
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > Self::MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Moves the player one cell. Rejected moves change nothing.
    pub fn try_move(&mut self, dir: Direction) -> Result<Position, MoveError> {
        if self.state != GameState::Exploring {
            return Err(MoveError::Finished);
        }

        match self.step(dir) {
            Ok(pos) => {
                self.moves += 1;
                tracing::debug!(%dir, to = %pos, moves = self.moves, "move accepted");
                if pos == self.exit {
                    self.state = GameState::Arrived;
                    tracing::info!(moves = self.moves, "exit reached");
                    self.push_log(format!("You reached the exit in {} moves!", self.moves));
                }
                Ok(pos)
            }
            Err(e) => {
                self.rejected += 1;
                tracing::debug!(%dir, error = %e, "move rejected");
                Err(e)
            }
        }
    }

    /// Grid bookkeeping for a single move, ignoring session state.
    /// Entrance and exit keep their markers while the player stands on them.
    fn step(&mut self, dir: Direction) -> Result<Position, MoveError> {
        let (dr, dc) = dir.delta();
        let next = self
            .grid
            .offset(self.player, dr, dc)
            .ok_or(MoveError::OutOfBounds {
                from: self.player,
                direction: dir,
            })?;

        if !self.grid.is_walkable(next) {
            return Err(MoveError::BlockedCell { at: next });
        }

        if self.grid.get(self.player) == Cell::PlayerHere {
            self.grid.set(self.player, Cell::Open);
        }
        if !self.grid.get(next).is_landmark() {
            self.grid.set(next, Cell::PlayerHere);
        }
        self.player = next;
        Ok(next)
    }

    /// Applies one input. Returns `false` when the loop should stop.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::None => {}
            Action::Invalid => self.push_log("Invalid key. Use W, S, A, D or the arrow keys."),
            Action::Move(dir) => match self.try_move(dir) {
                Ok(_) => {}
                Err(MoveError::Finished) => {}
                Err(e) => self.push_log(e.to_string()),
            },
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::search::SearchStrategy;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn world(rows: &[&[u8]], entrance: Position, exit: Position) -> World {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        let mut grid = Grid::from_rows(&rows).unwrap();
        grid.set(entrance, Cell::Entrance);
        grid.set(exit, Cell::Exit);
        let connected = SearchStrategy::Backtracking.reachable(&grid, entrance, exit);
        World::new(
            GeneratedMaze {
                grid,
                entrance,
                exit,
                connected,
            },
            0,
        )
    }

    #[test]
    fn blocked_move_keeps_position() {
        let mut w = world(
            &[&[1, 0, 1], &[1, 1, 1], &[1, 1, 1]],
            Position::new(0, 0),
            Position::new(2, 2),
        );
        assert_eq!(
            w.try_move(Direction::Right),
            Err(MoveError::BlockedCell { at: Position::new(0, 1) })
        );
        assert_eq!(w.player, Position::new(0, 0));
        assert_eq!(w.rejected, 1);
    }

    #[test]
    fn out_of_bounds_move_is_rejected() {
        let mut w = world(&[&[1, 1], &[1, 1]], Position::new(0, 0), Position::new(1, 1));
        assert_eq!(
            w.try_move(Direction::Up),
            Err(MoveError::OutOfBounds {
                from: Position::new(0, 0),
                direction: Direction::Up,
            })
        );
        assert!(w.try_move(Direction::Left).is_err());
        assert_eq!(w.player, Position::new(0, 0));
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut w = world(
            &[&[1, 0, 1], &[1, 1, 1], &[1, 1, 1]],
            Position::new(0, 0),
            Position::new(2, 2),
        );
        w.try_move(Direction::Down).unwrap();
        let grid = w.grid.clone();
        let player = w.player;
        for dir in [Direction::Left, Direction::Left] {
            assert!(w.try_move(dir).is_err());
        }
        w.try_move(Direction::Up).unwrap();
        assert!(w.try_move(Direction::Right).is_err());
        assert!(w.try_move(Direction::Up).is_err());
        w.try_move(Direction::Down).unwrap();
        assert_eq!(w.grid, grid);
        assert_eq!(w.player, player);
    }

    #[test]
    fn walking_marks_and_clears_cells() {
        let mut w = world(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]], Position::new(0, 0), Position::new(2, 2));
        w.try_move(Direction::Right).unwrap();
        assert_eq!(w.grid.get(Position::new(0, 1)), Cell::PlayerHere);
        assert_eq!(w.grid.get(Position::new(0, 0)), Cell::Entrance);
        w.try_move(Direction::Right).unwrap();
        assert_eq!(w.grid.get(Position::new(0, 1)), Cell::Open);
        assert_eq!(w.grid.get(Position::new(0, 2)), Cell::PlayerHere);
        assert_eq!(w.grid.count(Cell::PlayerHere), 1);
    }

    #[test]
    fn back_and_forth_restores_markers() {
        let mut w = world(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]], Position::new(0, 0), Position::new(2, 2));
        w.try_move(Direction::Down).unwrap();
        let snapshot = w.grid.clone();
        for _ in 0..5 {
            w.try_move(Direction::Right).unwrap();
            w.try_move(Direction::Left).unwrap();
        }
        assert_eq!(w.grid, snapshot);
        assert_eq!(w.player, Position::new(1, 0));
    }

    #[test]
    fn entrance_stays_visible() {
        let mut w = world(&[&[1, 1], &[1, 1]], Position::new(0, 0), Position::new(1, 1));
        w.try_move(Direction::Right).unwrap();
        w.try_move(Direction::Left).unwrap();
        assert_eq!(w.player, Position::new(0, 0));
        assert_eq!(w.grid.get(Position::new(0, 0)), Cell::Entrance);
        assert_eq!(w.grid.count(Cell::PlayerHere), 0);
        assert_eq!(w.grid.get(Position::new(0, 1)), Cell::Open);
    }

    #[test]
    fn reaching_exit_ends_session() {
        let mut w = world(&[&[1, 1], &[1, 1]], Position::new(0, 0), Position::new(1, 1));
        assert_eq!(w.state, GameState::Exploring);
        w.try_move(Direction::Down).unwrap();
        assert!(!w.is_arrived());
        w.try_move(Direction::Right).unwrap();
        assert!(w.is_arrived());
        assert_eq!(w.grid.get(Position::new(1, 1)), Cell::Exit);
        assert_eq!(w.moves, 2);
        assert_eq!(w.try_move(Direction::Up), Err(MoveError::Finished));
        assert_eq!(w.player, Position::new(1, 1));
    }

    #[test]
    fn disconnected_maze_refuses_play() {
        let mut w = world(&[&[1, 0], &[0, 1]], Position::new(0, 0), Position::new(1, 1));
        assert!(!w.connected);
        assert_eq!(w.state, GameState::Disconnected);
        assert_eq!(w.try_move(Direction::Right), Err(MoveError::Finished));
        assert!(w.apply_action(Action::Move(Direction::Down)));
        assert_eq!(w.player, Position::new(0, 0));
    }

    #[test]
    fn disconnected_maze_stays_disconnected_under_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = MazeConfig {
            size: 6,
            ..MazeConfig::default()
        };
        let mut checked = 0;
        for seed in 0..200 {
            let mut w = World::generate(&config, seed).unwrap();
            if w.connected {
                continue;
            }
            checked += 1;
            let walls: Vec<bool> = w.grid.cells.iter().map(|c| c.is_walkable()).collect();
            for _ in 0..50 {
                let dir = Direction::ALL[rng.gen_range(0..4)];
                let _ = w.step(dir);
                assert!(!SearchStrategy::FloodFill.reachable(&w.grid, w.entrance, w.exit));
            }
            let after: Vec<bool> = w.grid.cells.iter().map(|c| c.is_walkable()).collect();
            assert_eq!(walls, after);
        }
        assert!(checked > 0);
    }

    #[test]
    fn apply_action_reports_rejections() {
        let mut w = world(&[&[1, 0], &[1, 1]], Position::new(0, 0), Position::new(1, 1));
        let before = w.logs.len();
        assert!(w.apply_action(Action::Move(Direction::Right)));
        assert_eq!(w.logs.len(), before + 1);
        assert!(w.apply_action(Action::Invalid));
        assert_eq!(w.logs.len(), before + 2);
        assert!(!w.apply_action(Action::Quit));
    }

    #[test]
    fn log_is_bounded() {
        let mut w = world(&[&[1, 1], &[1, 1]], Position::new(0, 0), Position::new(1, 1));
        for i in 0..200 {
            w.push_log(format!("line {i}"));
        }
        assert_eq!(w.logs.len(), World::MAX_LOGS);
        assert_eq!(w.logs.back().map(String::as_str), Some("line 199"));
    }
}
