//! The view of the game an agent decides against

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::{Action, Grid, Position, Team};

/// Public state of one agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// `None` when the agent is not observed
    pub position: Option<Position>,
    /// True while the agent stands on the enemy half
    pub is_pacman: bool,
    pub num_carrying: u32,
    pub num_returned: u32,
}

/// Snapshot of the world offered to agents.
///
/// Implementations are immutable snapshots: `successor` returns a new state
/// and never modifies `self`.
pub trait WorldState: Sized {
    /// Number of agents in the game
    fn num_agents(&self) -> usize;

    /// Actions `agent` may take in this state
    fn legal_actions(&self, agent: usize) -> Vec<Action>;

    /// State reached after `agent` takes `action`
    fn successor(&self, agent: usize, action: Action) -> Result<Self, GameError>;

    /// State of one agent
    fn agent_state(&self, agent: usize) -> Result<AgentState, GameError>;

    /// Wall layout
    fn walls(&self) -> &Grid;

    /// Food that `team` is trying to eat (on the opponent's half)
    fn food_to_eat(&self, team: Team) -> Vec<Position>;

    /// Team `agent` plays for
    fn team_of(&self, agent: usize) -> Team {
        Team::of_agent(agent)
    }

    /// Indices of the agents playing against `team`
    fn opponents(&self, team: Team) -> Vec<usize> {
        (0..self.num_agents())
            .filter(|&i| self.team_of(i) != team)
            .collect()
    }

    /// Open cells of `team`'s home boundary column
    fn home_border(&self, team: Team) -> Vec<Position> {
        let walls = self.walls();
        walls.open_cells_in_column(team.border_column(walls.width()))
    }
}
