//! Agent roles
//!
//! A role is a [`Heuristic`]: a fixed feature schema, a feature extractor and
//! a weight table over that schema. [`Role`] names the concrete heuristics and
//! is the only way agents are built from a name.

use std::fmt;
use std::str::FromStr;

use capture_core::{Position, WorldState};
use serde::{Deserialize, Serialize};

use crate::defense::Defense;
use crate::error::AgentError;
use crate::features::{Feature, FeatureContext, FeatureVector, WeightVector};
use crate::offense::Offense;

/// Feature extraction and weighting for one role
pub trait Heuristic {
    /// Feature keys produced by `features` and weighted by `weights`
    const SCHEMA: &'static [Feature];

    /// Features of `successor`, the state reached by the candidate action
    fn features<W: WorldState>(
        &self,
        ctx: &FeatureContext<'_>,
        successor: &W,
    ) -> Result<FeatureVector, AgentError>;

    /// Fixed linear weights
    fn weights(&self) -> WeightVector;
}

/// Concrete agent roles
///
/// Serialized by display name; deserialized through [`FromStr`], so option
/// strings and config files accept the same names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Offensive,
    Defensive,
}

impl Role {
    pub fn schema(self) -> &'static [Feature] {
        match self {
            Role::Offensive => Offense::SCHEMA,
            Role::Defensive => Defense::SCHEMA,
        }
    }

    pub fn features<W: WorldState>(
        self,
        ctx: &FeatureContext<'_>,
        successor: &W,
    ) -> Result<FeatureVector, AgentError> {
        match self {
            Role::Offensive => Offense.features(ctx, successor),
            Role::Defensive => Defense.features(ctx, successor),
        }
    }

    pub fn weights(self) -> WeightVector {
        match self {
            Role::Offensive => Offense.weights(),
            Role::Defensive => Defense.weights(),
        }
    }
}

impl FromStr for Role {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offensiveagent" | "offensive" | "offense" => Ok(Role::Offensive),
            "defensiveagent" | "defensive" | "defense" => Ok(Role::Defensive),
            _ => Err(AgentError::UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AgentError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Offensive => f.write_str("OffensiveAgent"),
            Role::Defensive => f.write_str("DefensiveAgent"),
        }
    }
}

/// Position of the deciding agent in `state`
pub(crate) fn own_position<W: WorldState>(state: &W, agent: usize) -> Result<Position, AgentError> {
    state
        .agent_state(agent)?
        .position
        .ok_or(AgentError::Unpositioned { agent })
}

/// Distance to the closest target, `0.0` when none is reachable
pub(crate) fn nearest_or_zero<I>(ctx: &FeatureContext<'_>, from: Position, targets: I) -> f64
where
    I: IntoIterator<Item = Position>,
{
    ctx.distancer.nearest(from, targets).map_or(0.0, f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_names() {
        assert_eq!("OffensiveAgent".parse::<Role>().unwrap(), Role::Offensive);
        assert_eq!("defensive".parse::<Role>().unwrap(), Role::Defensive);
        assert_eq!(" Defense ".parse::<Role>().unwrap(), Role::Defensive);
        assert_eq!(
            "eval('rm -rf')".parse::<Role>().unwrap_err(),
            AgentError::UnknownRole("eval('rm -rf')".to_string())
        );
    }

    #[test]
    fn test_display_round_trips() {
        for role in [Role::Offensive, Role::Defensive] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_weights_cover_schema() {
        for role in [Role::Offensive, Role::Defensive] {
            assert_eq!(role.weights().schema_mismatch(role.schema()), None);
            assert_eq!(role.weights().len(), role.schema().len());
        }
    }

    #[test]
    fn test_all_weights_negative() {
        for role in [Role::Offensive, Role::Defensive] {
            assert!(role.weights().entries().iter().all(|&(_, w)| w < 0.0));
        }
    }

    #[test]
    fn test_serde_accepts_option_string_names() {
        for name in ["OffensiveAgent", "offensive", "Offense", "offense"] {
            let role: Role = serde_json::from_str(&format!("{:?}", name)).unwrap();
            assert_eq!(role, Role::Offensive, "{}", name);
        }
        for name in ["DefensiveAgent", "Defensive", "defense"] {
            let role: Role = serde_json::from_str(&format!("{:?}", name)).unwrap();
            assert_eq!(role, Role::Defensive, "{}", name);
        }
        assert!(serde_json::from_str::<Role>(r#""Sneaky""#).is_err());
        assert_eq!(serde_json::to_string(&Role::Defensive).unwrap(), r#""DefensiveAgent""#);
    }
}
