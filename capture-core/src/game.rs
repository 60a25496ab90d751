//! Reference capture engine: game state and rules

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::{Action, Grid, Position, Team};
use crate::layout::Layout;
use crate::world::{AgentState, WorldState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Food left on a side when the game ends early
pub const MIN_FOOD: usize = 2;

/// Opponents farther than this (Manhattan) are hidden from an observer
pub const SIGHT_RANGE: u32 = 5;

/// Default move budget (agent moves, all agents combined)
pub const DEFAULT_MAX_MOVES: u32 = 1200;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlueWins,
    Tie,
}

/// Engine-side bookkeeping for one agent
#[derive(Clone, Debug)]
struct AgentSlot {
    state: AgentState,
    start: Position,
    /// Cells the carried food was eaten from, restored on death
    carried_from: Vec<Position>,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (successors are new values; walls are shared)
#[derive(Clone, Debug)]
pub struct CaptureState {
    walls: Arc<Grid>,
    food: Grid,
    agents: Vec<AgentSlot>,
    /// Food each side started with
    initial_food: [usize; 2],
    /// Positive favors red
    score: i32,
    moves_left: u32,
    result: GameResult,
}

impl CaptureState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new game from a layout
    pub fn new(layout: &Layout) -> Self {
        let agents = layout
            .agent_starts
            .iter()
            .map(|&start| AgentSlot {
                state: AgentState {
                    position: Some(start),
                    is_pacman: false,
                    num_carrying: 0,
                    num_returned: 0,
                },
                start,
                carried_from: Vec::new(),
            })
            .collect();

        let width = layout.width();
        let red_food = layout
            .food
            .positions()
            .filter(|&p| Team::Red.is_home(p, width))
            .count();
        let blue_food = layout.food.count() - red_food;

        Self {
            walls: Arc::new(layout.walls.clone()),
            food: layout.food.clone(),
            agents,
            initial_food: [red_food, blue_food],
            score: 0,
            moves_left: DEFAULT_MAX_MOVES,
            result: GameResult::Ongoing,
        }
    }

    /// Set the move budget
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.moves_left = max_moves;
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Score, positive when red leads
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// All food on the board
    pub fn food(&self) -> &Grid {
        &self.food
    }

    /// Food on `team`'s own half
    pub fn food_defending(&self, team: Team) -> Vec<Position> {
        let width = self.walls.width();
        self.food
            .positions()
            .filter(|&p| team.is_home(p, width))
            .collect()
    }

    fn slot(&self, agent: usize) -> Result<&AgentSlot, GameError> {
        self.agents.get(agent).ok_or(GameError::UnknownAgent(agent))
    }

    // ========================================================================
    // OBSERVATION
    // ========================================================================

    /// Copy of this state as seen by `agent`: opponents out of sight lose their position
    pub fn observation_for(&self, agent: usize) -> Result<Self, GameError> {
        let observer = self.slot(agent)?.state.position;
        let team = Team::of_agent(agent);
        let mut observed = self.clone();

        for (i, slot) in observed.agents.iter_mut().enumerate() {
            if Team::of_agent(i) == team {
                continue;
            }
            let visible = match (observer, slot.state.position) {
                (Some(o), Some(p)) => o.manhattan(p) <= SIGHT_RANGE,
                _ => false,
            };
            if !visible {
                slot.state.position = None;
            }
        }

        Ok(observed)
    }

    // ========================================================================
    // RULES
    // ========================================================================

    fn apply_action(&mut self, agent: usize, action: Action) -> Result<(), GameError> {
        let team = Team::of_agent(agent);
        let width = self.walls.width();

        let current = self.agents[agent]
            .state
            .position
            .ok_or(GameError::Unpositioned(agent))?;
        let next = current.step(action);

        {
            let slot = &mut self.agents[agent];
            slot.state.position = Some(next);
            slot.state.is_pacman = !team.is_home(next, width);
        }

        // Eat enemy food
        if self.agents[agent].state.is_pacman && self.food.get(next) {
            self.food.set(next, false);
            let slot = &mut self.agents[agent];
            slot.state.num_carrying += 1;
            slot.carried_from.push(next);
        }

        // Return food on reaching home
        if !self.agents[agent].state.is_pacman && self.agents[agent].state.num_carrying > 0 {
            let slot = &mut self.agents[agent];
            let returned = slot.state.num_carrying;
            slot.state.num_returned += returned;
            slot.state.num_carrying = 0;
            slot.carried_from.clear();
            self.score += team.score_sign() * returned as i32;
        }

        self.resolve_collisions(agent, next);
        self.check_food_win(team);

        self.moves_left = self.moves_left.saturating_sub(1);
        if self.moves_left == 0 && self.result == GameResult::Ongoing {
            self.result = self.result_by_score();
        }

        Ok(())
    }

    /// Pacmen sharing a cell with an opposing ghost are eaten
    fn resolve_collisions(&mut self, mover: usize, at: Position) {
        let team = Team::of_agent(mover);
        let opponents: Vec<usize> = (0..self.agents.len())
            .filter(|&i| Team::of_agent(i) != team && self.agents[i].state.position == Some(at))
            .collect();

        for other in opponents {
            if self.agents[mover].state.is_pacman {
                if !self.agents[other].state.is_pacman {
                    self.kill(mover);
                    return;
                }
            } else if self.agents[other].state.is_pacman {
                self.kill(other);
            }
        }
    }

    fn kill(&mut self, agent: usize) {
        let slot = &mut self.agents[agent];
        for pos in slot.carried_from.drain(..) {
            self.food.set(pos, true);
        }
        slot.state.num_carrying = 0;
        slot.state.position = Some(slot.start);
        slot.state.is_pacman = false;
    }

    fn check_food_win(&mut self, team: Team) {
        if self.result != GameResult::Ongoing {
            return;
        }
        let target = self.initial_food[team.opponent().index()].saturating_sub(MIN_FOOD);
        let returned: u32 = self
            .agents
            .iter()
            .enumerate()
            .filter(|&(i, _)| Team::of_agent(i) == team)
            .map(|(_, s)| s.state.num_returned)
            .sum();

        if target > 0 && returned as usize >= target {
            self.result = match team {
                Team::Red => GameResult::RedWins,
                Team::Blue => GameResult::BlueWins,
            };
        }
    }

    fn result_by_score(&self) -> GameResult {
        match self.score {
            s if s > 0 => GameResult::RedWins,
            s if s < 0 => GameResult::BlueWins,
            _ => GameResult::Tie,
        }
    }
}

// ============================================================================
// WORLD STATE
// ============================================================================

impl WorldState for CaptureState {
    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    fn legal_actions(&self, agent: usize) -> Vec<Action> {
        let position = match self.agents.get(agent).and_then(|s| s.state.position) {
            Some(p) => p,
            None => return vec![],
        };

        Action::ALL
            .into_iter()
            .filter(|&a| a == Action::Stop || !self.walls.get(position.step(a)))
            .filter(|&a| self.walls.contains(position.step(a)))
            .collect()
    }

    fn successor(&self, agent: usize, action: Action) -> Result<Self, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.slot(agent)?;
        if !self.legal_actions(agent).contains(&action) {
            return Err(GameError::IllegalAction { agent, action });
        }

        let mut next = self.clone();
        next.apply_action(agent, action)?;
        Ok(next)
    }

    fn agent_state(&self, agent: usize) -> Result<AgentState, GameError> {
        Ok(self.slot(agent)?.state)
    }

    fn walls(&self) -> &Grid {
        &self.walls
    }

    fn food_to_eat(&self, team: Team) -> Vec<Position> {
        self.food_defending(team.opponent())
    }
}

// ============================================================================
// TESTS
// ============================================================================
