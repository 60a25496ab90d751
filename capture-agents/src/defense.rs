//! Defensive heuristic: chase visible invaders, otherwise hold the border

use capture_core::{Position, WorldState};

use crate::error::AgentError;
use crate::features::{Feature, FeatureContext, FeatureVector, WeightVector};
use crate::role::{nearest_or_zero, own_position, Heuristic};

/// Defensive role
#[derive(Clone, Copy, Debug, Default)]
pub struct Defense;

impl Heuristic for Defense {
    const SCHEMA: &'static [Feature] = &[
        Feature::Invaders,
        Feature::InvaderDistance,
        Feature::DefendBorder,
    ];

    fn features<W: WorldState>(
        &self,
        ctx: &FeatureContext<'_>,
        successor: &W,
    ) -> Result<FeatureVector, AgentError> {
        let position = own_position(successor, ctx.index)?;
        let invaders = invader_positions(ctx, successor)?;

        // 0 means "no invader", not "invader on top of us"
        let invader_distance = nearest_or_zero(ctx, position, invaders.iter().copied());
        let defend_border = nearest_or_zero(ctx, position, successor.home_border(ctx.team));

        Ok([
            (Feature::Invaders, invaders.len() as f64),
            (Feature::InvaderDistance, invader_distance),
            (Feature::DefendBorder, defend_border),
        ]
        .into_iter()
        .collect())
    }

    fn weights(&self) -> WeightVector {
        [
            (Feature::Invaders, -100.0),
            (Feature::InvaderDistance, -10.0),
            (Feature::DefendBorder, -1.0),
        ]
        .into_iter()
        .collect()
    }
}

/// Visible opponents currently on our half
fn invader_positions<W: WorldState>(
    ctx: &FeatureContext<'_>,
    state: &W,
) -> Result<Vec<Position>, AgentError> {
    let mut invaders = Vec::new();
    for opponent in state.opponents(ctx.team) {
        let s = state.agent_state(opponent)?;
        if let (true, Some(pos)) = (s.is_pacman, s.position) {
            invaders.push(pos);
        }
    }
    Ok(invaders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_core::{Action, CaptureState, Distancer, Layout, Team};

    // Blue defender (2) east of the middle, red attacker (1) far west.
    //   x: 0123456789012345
    const FIELD: &str = "\
%%%%%%%%%%%%%%%%
%1             %
%            2 %
%%%%%%%%%%%%%%%%";

    fn setup() -> (CaptureState, Distancer) {
        let state = CaptureState::new(&Layout::parse(FIELD).unwrap());
        let distancer = Distancer::new(state.walls());
        (state, distancer)
    }

    fn ctx(distancer: &Distancer) -> FeatureContext<'_> {
        FeatureContext {
            index: 1,
            team: Team::Blue,
            carrying: 0,
            distancer,
        }
    }

    #[test]
    fn test_no_invaders() {
        let (state, distancer) = setup();
        // Blue at (13,1); border column 16 / 2 = 8; step west -> (12,1), 4 from (8,1)
        let successor = state.successor(1, Action::West).unwrap();
        let f = Defense.features(&ctx(&distancer), &successor).unwrap();

        assert_eq!(f.get(Feature::Invaders), Some(0.0));
        assert_eq!(f.get(Feature::InvaderDistance), Some(0.0));
        assert_eq!(f.get(Feature::DefendBorder), Some(4.0));
        assert_eq!(f.dot(&Defense.weights()), Ok(-4.0));
    }

    #[test]
    fn test_invader_distance() {
        let (state, distancer) = setup();
        // Red (index 0) walks from (1,2) to (10,2), onto the blue half
        let invaded = [Action::East; 9]
            .iter()
            .fold(state, |s, &a| s.successor(0, a).unwrap());
        assert!(invaded.agent_state(0).unwrap().is_pacman);

        let successor = invaded.successor(1, Action::West).unwrap();
        let f = Defense.features(&ctx(&distancer), &successor).unwrap();

        // (12,1) -> (10,2) = 3
        assert_eq!(f.get(Feature::Invaders), Some(1.0));
        assert_eq!(f.get(Feature::InvaderDistance), Some(3.0));
        assert_eq!(f.get(Feature::DefendBorder), Some(4.0));
        assert_eq!(f.dot(&Defense.weights()), Ok(-100.0 - 30.0 - 4.0));
    }

    #[test]
    fn test_hidden_invaders_not_counted() {
        let (state, distancer) = setup();
        let invaded = [Action::East; 8]
            .iter()
            .fold(state, |s, &a| s.successor(0, a).unwrap());
        // Red at (9,2) is a pacman; blue at (13,1) is 5 away and sees it
        let obs = invaded.observation_for(1).unwrap();
        let f = Defense.features(&ctx(&distancer), &obs).unwrap();
        assert_eq!(f.get(Feature::Invaders), Some(1.0));
        assert_eq!(f.get(Feature::InvaderDistance), Some(5.0));

        // One step back west and it drops out of sight
        let hidden = invaded.successor(0, Action::West).unwrap();
        assert!(hidden.agent_state(0).unwrap().is_pacman);
        let obs = hidden.observation_for(1).unwrap();
        let f = Defense.features(&ctx(&distancer), &obs).unwrap();
        assert_eq!(f.get(Feature::Invaders), Some(0.0));
        assert_eq!(f.get(Feature::InvaderDistance), Some(0.0));
    }
}
