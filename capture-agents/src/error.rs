//! Agent errors

use capture_core::{GameError, Team};
use thiserror::Error;

use crate::features::Feature;
use crate::role::Role;

/// Errors raised while building agents or choosing actions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error("agent {agent} has no legal action")]
    NoLegalActions { agent: usize },

    #[error("agent {agent} chose an action before register_initial_state")]
    NotInitialized { agent: usize },

    #[error("agent {agent} was built for {claimed:?} but the game puts it on {actual:?}")]
    TeamMismatch { agent: usize, claimed: Team, actual: Team },

    #[error("agent {agent} has no known position")]
    Unpositioned { agent: usize },

    #[error("{role:?} features and weights disagree on {feature:?}")]
    SchemaMismatch { role: Role, feature: Feature },

    #[error("unknown agent role {0:?}")]
    UnknownRole(String),

    #[error("invalid team option {0:?}")]
    InvalidOption(String),

    #[error(transparent)]
    Engine(#[from] GameError),
}
