//! Engine errors

use thiserror::Error;

use crate::grid::Action;

/// Errors raised by the capture engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid layout (line {line}): {reason}")]
    InvalidLayout { line: usize, reason: String },

    #[error("agent index {0} is out of range")]
    UnknownAgent(usize),

    #[error("agent {agent} cannot take {action:?} from its current position")]
    IllegalAction { agent: usize, action: Action },

    #[error("agent {0} has no known position")]
    Unpositioned(usize),

    #[error("the game is already over")]
    GameOver,
}
