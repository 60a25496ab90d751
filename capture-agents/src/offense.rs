//! Offensive heuristic: eat enemy food, keep away from ghosts, bank what you carry

use capture_core::WorldState;

use crate::error::AgentError;
use crate::features::{Feature, FeatureContext, FeatureVector, WeightVector};
use crate::role::{nearest_or_zero, own_position, Heuristic};

/// Keeps `ghostThreat` finite when a ghost shares the agent's cell
pub const EPSILON: f64 = 1e-10;

/// Offensive role
#[derive(Clone, Copy, Debug, Default)]
pub struct Offense;

impl Heuristic for Offense {
    const SCHEMA: &'static [Feature] = &[
        Feature::NearestFoodDistance,
        Feature::FoodsLeft,
        Feature::GhostThreat,
        Feature::DesireToReturn,
    ];

    fn features<W: WorldState>(
        &self,
        ctx: &FeatureContext<'_>,
        successor: &W,
    ) -> Result<FeatureVector, AgentError> {
        let position = own_position(successor, ctx.index)?;
        let foods = successor.food_to_eat(ctx.team);

        // Ghosts: opponents on their own half whose position we can see
        let mut ghosts = Vec::new();
        for opponent in successor.opponents(ctx.team) {
            let state = successor.agent_state(opponent)?;
            if let (false, Some(pos)) = (state.is_pacman, state.position) {
                ghosts.push(pos);
            }
        }
        let ghost_distance = ctx.distancer.nearest(position, ghosts);

        let desire = if ctx.carrying == 0 {
            0.0
        } else {
            let border = nearest_or_zero(ctx, position, successor.home_border(ctx.team));
            desire_to_return(ctx.carrying, border)
        };

        Ok([
            (Feature::NearestFoodDistance, nearest_or_zero(ctx, position, foods.iter().copied())),
            (Feature::FoodsLeft, foods.len() as f64),
            (Feature::GhostThreat, ghost_threat(ghost_distance)),
            (Feature::DesireToReturn, desire),
        ]
        .into_iter()
        .collect())
    }

    fn weights(&self) -> WeightVector {
        [
            (Feature::NearestFoodDistance, -2.0),
            (Feature::FoodsLeft, -20.0),
            (Feature::GhostThreat, -19.0),
            (Feature::DesireToReturn, -2.0),
        ]
        .into_iter()
        .collect()
    }
}

/// `1 / (d + EPSILON)`; no visible ghost is no threat
pub fn ghost_threat(distance: Option<u32>) -> f64 {
    match distance {
        Some(d) => 1.0 / (f64::from(d) + EPSILON),
        None => 0.0,
    }
}

/// `carrying² × border distance`
pub fn desire_to_return(carrying: u32, border_distance: f64) -> f64 {
    let carrying = f64::from(carrying);
    carrying * carrying * border_distance
}
