//! Team creation and team options

use std::str::FromStr;

use capture_core::Team;
use serde::{Deserialize, Serialize};

use crate::agent::CaptureAgent;
use crate::error::AgentError;
use crate::role::Role;

/// Options for building a team
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamOptions {
    /// Role of the agent with the first index
    pub first: Role,
    /// Role of the agent with the second index
    pub second: Role,
    /// Tie-break seed (None = entropy)
    pub seed: Option<u64>,
}

impl Default for TeamOptions {
    fn default() -> Self {
        Self {
            first: Role::Offensive,
            second: Role::Defensive,
            seed: None,
        }
    }
}

impl TeamOptions {
    /// Set both roles
    pub fn with_roles(mut self, first: Role, second: Role) -> Self {
        self.first = first;
        self.second = second;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for one agent, derived from the team seed and its index
    fn agent_seed(&self, index: usize) -> Option<u64> {
        self.seed
            .map(|s| s ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Parses `key=value` pairs separated by commas, e.g.
/// `first=OffensiveAgent,second=DefensiveAgent,seed=7`
impl FromStr for TeamOptions {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = TeamOptions::default();

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| AgentError::InvalidOption(pair.to_string()))?;
            match key.trim() {
                "first" => options.first = value.parse()?,
                "second" => options.second = value.parse()?,
                "seed" => {
                    options.seed = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| AgentError::InvalidOption(pair.to_string()))?,
                    )
                }
                _ => return Err(AgentError::InvalidOption(pair.to_string())),
            }
        }

        Ok(options)
    }
}

/// Build the two agents of a team
pub fn create_team(
    first_index: usize,
    second_index: usize,
    team: Team,
    options: &TeamOptions,
) -> Result<[CaptureAgent; 2], AgentError> {
    let build = |index: usize, role: Role| match options.agent_seed(index) {
        Some(seed) => CaptureAgent::with_seed(index, team, role, seed),
        None => CaptureAgent::new(index, team, role),
    };

    tracing::debug!(
        "Creating {:?} team: {} as {}, {} as {}",
        team,
        first_index,
        options.first,
        second_index,
        options.second
    );

    Ok([
        build(first_index, options.first)?,
        build(second_index, options.second)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_options_defaults() {
        let options = TeamOptions::default();
        assert_eq!(options.first, Role::Offensive);
        assert_eq!(options.second, Role::Defensive);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn test_parse_option_string() {
        let options: TeamOptions = "first=DefensiveAgent, second=OffensiveAgent,seed=7"
            .parse()
            .unwrap();
        assert_eq!(options.first, Role::Defensive);
        assert_eq!(options.second, Role::Offensive);
        assert_eq!(options.seed, Some(7));

        assert_eq!("".parse::<TeamOptions>().unwrap(), TeamOptions::default());
    }

    #[test]
    fn test_parse_option_errors() {
        assert_eq!(
            "first".parse::<TeamOptions>().unwrap_err(),
            AgentError::InvalidOption("first".to_string())
        );
        assert_eq!(
            "third=OffensiveAgent".parse::<TeamOptions>().unwrap_err(),
            AgentError::InvalidOption("third=OffensiveAgent".to_string())
        );
        assert_eq!(
            "first=Sneaky".parse::<TeamOptions>().unwrap_err(),
            AgentError::UnknownRole("Sneaky".to_string())
        );
        assert!("seed=-1".parse::<TeamOptions>().is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: TeamOptions = serde_json::from_str(r#"{"second": "OffensiveAgent"}"#).unwrap();
        assert_eq!(options.first, Role::Offensive);
        assert_eq!(options.second, Role::Offensive);

        // Same names as the option string form
        let options: TeamOptions =
            serde_json::from_str(r#"{"first": "defense", "second": "offense", "seed": 3}"#).unwrap();
        assert_eq!(options, "first=defense,second=offense,seed=3".parse::<TeamOptions>().unwrap());
    }

    #[test]
    fn test_create_team() {
        let options = TeamOptions::default().with_seed(11);
        let [first, second] = create_team(0, 2, Team::Red, &options).unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(first.role(), Role::Offensive);
        assert_eq!(second.index(), 2);
        assert_eq!(second.role(), Role::Defensive);
        assert_eq!(second.team(), Team::Red);
    }

    #[test]
    fn test_agent_seeds_differ() {
        let options = TeamOptions::default().with_seed(11);
        assert_ne!(options.agent_seed(1), options.agent_seed(3));
        assert_eq!(TeamOptions::default().agent_seed(1), None);
    }
}
