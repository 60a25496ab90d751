//! Action evaluation
//!
//! Score of an action = features of the successor state · role weights.

use capture_core::{Action, WorldState};
use serde::Serialize;

use crate::error::AgentError;
use crate::features::{FeatureContext, FeatureVector, WeightVector};
use crate::role::Role;

/// Scored candidate action
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub action: Action,
    pub features: FeatureVector,
    pub score: f64,
}

/// A role bound to its weight table
#[derive(Clone, Debug)]
pub struct Evaluator {
    role: Role,
    weights: WeightVector,
}

impl Evaluator {
    /// Bind `role` to its weights, checking both share the role's schema
    pub fn new(role: Role) -> Result<Self, AgentError> {
        Self::with_weights(role, role.weights())
    }

    /// Bind `role` to explicit weights
    pub fn with_weights(role: Role, weights: WeightVector) -> Result<Self, AgentError> {
        if let Some(feature) = weights.schema_mismatch(role.schema()) {
            return Err(AgentError::SchemaMismatch { role, feature });
        }
        Ok(Self { role, weights })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Score of `action` for the agent described by `ctx`
    pub fn evaluate<W: WorldState>(
        &self,
        ctx: &FeatureContext<'_>,
        state: &W,
        action: Action,
    ) -> Result<f64, AgentError> {
        Ok(self.evaluate_detailed(ctx, state, action)?.score)
    }

    /// Score of `action` together with the features behind it
    pub fn evaluate_detailed<W: WorldState>(
        &self,
        ctx: &FeatureContext<'_>,
        state: &W,
        action: Action,
    ) -> Result<Evaluation, AgentError> {
        let successor = state.successor(ctx.index, action)?;
        let features = self.role.features(ctx, &successor)?;
        let score = features
            .dot(&self.weights)
            .map_err(|feature| AgentError::SchemaMismatch {
                role: self.role,
                feature,
            })?;

        tracing::trace!("agent {} {:?}: score {}", ctx.index, action, score);

        Ok(Evaluation {
            action,
            features,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Feature;
    use capture_core::{CaptureState, Distancer, GameError, Layout, Team};

    const ROOM: &str = "\
%%%%%%%%%%
%1  .  . %
%   .   2%
%%%%%%%%%%";

    #[test]
    fn test_evaluate_matches_dot_product() {
        let state = CaptureState::new(&Layout::parse(ROOM).unwrap());
        let distancer = Distancer::new(state.walls());
        let ctx = FeatureContext {
            index: 0,
            team: Team::Red,
            carrying: 0,
            distancer: &distancer,
        };
        let evaluator = Evaluator::new(Role::Offensive).unwrap();

        let eval = evaluator.evaluate_detailed(&ctx, &state, Action::East).unwrap();
        // Red at (2,2); blue food at (7,2); blue ghost at (8,1)
        assert_eq!(eval.features.get(Feature::NearestFoodDistance), Some(5.0));
        assert_eq!(eval.features.get(Feature::FoodsLeft), Some(1.0));
        let expected = -2.0 * 5.0 - 20.0 * 1.0 - 19.0 / (7.0 + 1e-10);
        assert!((eval.score - expected).abs() < 1e-9);
        assert_eq!(evaluator.evaluate(&ctx, &state, Action::East).unwrap(), eval.score);
    }

    #[test]
    fn test_illegal_action_surfaces_engine_error() {
        let state = CaptureState::new(&Layout::parse(ROOM).unwrap());
        let distancer = Distancer::new(state.walls());
        let ctx = FeatureContext {
            index: 0,
            team: Team::Red,
            carrying: 0,
            distancer: &distancer,
        };
        let evaluator = Evaluator::new(Role::Defensive).unwrap();
        let err = evaluator.evaluate(&ctx, &state, Action::North).unwrap_err();
        assert_eq!(
            err,
            AgentError::Engine(GameError::IllegalAction { agent: 0, action: Action::North })
        );
    }

    #[test]
    fn test_mismatched_weights_rejected() {
        let weights: WeightVector = [(Feature::Invaders, -1.0)].into_iter().collect();
        let err = Evaluator::with_weights(Role::Defensive, weights).unwrap_err();
        assert_eq!(
            err,
            AgentError::SchemaMismatch {
                role: Role::Defensive,
                feature: Feature::InvaderDistance
            }
        );

        let offensive_weights = Role::Offensive.weights();
        assert!(Evaluator::with_weights(Role::Defensive, offensive_weights).is_err());
    }
}
