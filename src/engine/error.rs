use thiserror::Error;

use crate::engine::action::Direction;
use crate::map::Position;

/// Errors raised while configuring, generating or driving a maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Input token is not one of the accepted directions.
    #[error("invalid direction {0:?}, expected one of W, S, A, D")]
    InvalidDirection(String),
    /// Settings that make generation impossible.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        MazeError::Io(err.to_string())
    }
}

/// Why a requested move was rejected. The session is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cannot move {direction} from {from}: outside the maze")]
    OutOfBounds { from: Position, direction: Direction },
    #[error("cannot move to {at}: the cell is blocked")]
    BlockedCell { at: Position },
    /// The player already arrived, or the maze has no way through.
    #[error("the maze session is over")]
    Finished,
}
