//! Reactive capture agents
//!
//! A [`CaptureAgent`] plays one role for a whole match. Each turn it scores
//! every legal action one ply ahead and takes the best, breaking ties at
//! random.

use std::time::{Duration, Instant};

use capture_core::{Action, Distancer, Team, WorldState};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::AgentError;
use crate::eval::{Evaluation, Evaluator};
use crate::features::FeatureContext;
use crate::role::Role;
use crate::selector::best_actions;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Time the engine allows for `register_initial_state`
pub const INIT_BUDGET: Duration = Duration::from_secs(15);

// ============================================================================
// CAPTURE AGENT
// ============================================================================

/// Greedy one-ply agent bound to a role
pub struct CaptureAgent {
    index: usize,
    team: Team,
    evaluator: Evaluator,
    distancer: Option<Distancer>,
    rng: ChaCha8Rng,
}

impl CaptureAgent {
    /// Agent with an entropy-seeded tie-break RNG
    pub fn new(index: usize, team: Team, role: Role) -> Result<Self, AgentError> {
        Self::build(index, team, role, ChaCha8Rng::from_entropy())
    }

    /// Agent with a reproducible tie-break RNG
    pub fn with_seed(index: usize, team: Team, role: Role, seed: u64) -> Result<Self, AgentError> {
        Self::build(index, team, role, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(index: usize, team: Team, role: Role, rng: ChaCha8Rng) -> Result<Self, AgentError> {
        Ok(Self {
            index,
            team,
            evaluator: Evaluator::new(role)?,
            distancer: None,
            rng,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn role(&self) -> Role {
        self.evaluator.role()
    }

    pub fn is_initialized(&self) -> bool {
        self.distancer.is_some()
    }

    /// One-time setup before play: confirms the team color with the game and
    /// builds the maze distance table
    pub fn register_initial_state<W: WorldState>(&mut self, state: &W) -> Result<(), AgentError> {
        state.agent_state(self.index)?;
        let actual = state.team_of(self.index);
        if actual != self.team {
            return Err(AgentError::TeamMismatch {
                agent: self.index,
                claimed: self.team,
                actual,
            });
        }

        let started = Instant::now();
        let distancer = Distancer::new(state.walls());
        let elapsed = started.elapsed();

        tracing::info!(
            "Agent {} ({:?}, {}) ready: {} cells in {:?}",
            self.index,
            self.team,
            self.role(),
            distancer.num_cells(),
            elapsed
        );
        if elapsed > INIT_BUDGET {
            tracing::warn!(
                "Agent {} initialization took {:?}, over the {:?} budget",
                self.index,
                elapsed,
                INIT_BUDGET
            );
        }

        self.distancer = Some(distancer);
        Ok(())
    }

    /// Pick the best legal action for this turn
    pub fn choose_action<W: WorldState>(&mut self, state: &W) -> Result<Action, AgentError> {
        let scored: Vec<(Action, f64)> = self
            .evaluate_all(state)?
            .into_iter()
            .map(|e| (e.action, e.score))
            .collect();

        let best = best_actions(&scored);
        let action = *best
            .choose(&mut self.rng)
            .ok_or(AgentError::NoLegalActions { agent: self.index })?;

        tracing::debug!(
            "Agent {} chose {:?} ({} of {} actions tied for best)",
            self.index,
            action,
            best.len(),
            scored.len()
        );

        Ok(action)
    }

    /// Score of one action in `state`
    pub fn evaluate_action<W: WorldState>(&self, state: &W, action: Action) -> Result<f64, AgentError> {
        let distancer = self.distancer()?;
        let ctx = self.context(state, distancer)?;
        self.evaluator.evaluate(&ctx, state, action)
    }

    /// Features and score of every legal action, in the engine's order
    pub fn evaluate_all<W: WorldState>(&self, state: &W) -> Result<Vec<Evaluation>, AgentError> {
        let distancer = self.distancer()?;

        let actions = state.legal_actions(self.index);
        if actions.is_empty() {
            return Err(AgentError::NoLegalActions { agent: self.index });
        }

        let ctx = self.context(state, distancer)?;
        actions
            .into_iter()
            .map(|action| self.evaluator.evaluate_detailed(&ctx, state, action))
            .collect()
    }

    fn distancer(&self) -> Result<&Distancer, AgentError> {
        self.distancer
            .as_ref()
            .ok_or(AgentError::NotInitialized { agent: self.index })
    }

    /// Reads this agent's current state once per decision
    fn context<'a, W: WorldState>(
        &self,
        state: &W,
        distancer: &'a Distancer,
    ) -> Result<FeatureContext<'a>, AgentError> {
        let own = state.agent_state(self.index)?;
        Ok(FeatureContext {
            index: self.index,
            team: self.team,
            carrying: own.num_carrying,
            distancer,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
