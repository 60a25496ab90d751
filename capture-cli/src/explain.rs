//! Explain command - show how one agent scores its legal actions
//!
//! Scores are computed on the agent's own observation of the initial state,
//! the same view it decides on during `play`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use capture_agents::{CaptureAgent, Evaluation, Role};
use capture_core::{Action, CaptureState, Layout, Team, WorldState};

#[derive(Args)]
pub struct ExplainArgs {
    /// Layout file (built-in layout when omitted)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Agent index
    #[arg(long, default_value = "0")]
    pub agent: usize,

    /// Role to score with (defaults to the team's role for this index)
    #[arg(long)]
    pub role: Option<String>,

    /// Output evaluations as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scored actions plus the one the agent picks
#[derive(Debug, Serialize)]
struct Explanation {
    agent: usize,
    team: Team,
    role: Role,
    chosen: Action,
    evaluations: Vec<Evaluation>,
}

/// Run explain command
pub fn run(args: ExplainArgs, seed: Option<u64>) -> Result<()> {
    let layout = match &args.layout {
        Some(path) => Layout::load(path)
            .with_context(|| format!("Failed to load layout: {}", path.display()))?,
        None => Layout::builtin().context("Built-in layout is invalid")?,
    };
    let role = match &args.role {
        Some(name) => name.parse()?,
        None => default_role(args.agent),
    };

    let explanation = explain(&layout, args.agent, role, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        print_explanation(&explanation);
    }
    Ok(())
}

/// Evaluate one agent on its observation of the starting state
fn explain(layout: &Layout, index: usize, role: Role, seed: Option<u64>) -> Result<Explanation> {
    let state = CaptureState::new(layout);
    let team = state.team_of(index);
    let mut agent = match seed {
        Some(seed) => CaptureAgent::with_seed(index, team, role, seed)?,
        None => CaptureAgent::new(index, team, role)?,
    };
    agent.register_initial_state(&state)?;

    let observation = state
        .observation_for(index)
        .with_context(|| format!("No agent {} in layout", index))?;
    let evaluations = agent.evaluate_all(&observation)?;
    let chosen = agent.choose_action(&observation)?;

    Ok(Explanation {
        agent: index,
        team,
        role,
        chosen,
        evaluations,
    })
}

/// Lower index of a team plays first (offense), the higher one second (defense)
fn default_role(agent: usize) -> Role {
    if agent < 2 {
        Role::Offensive
    } else {
        Role::Defensive
    }
}

fn print_explanation(explanation: &Explanation) {
    println!(
        "Agent {} ({:?}) as {}",
        explanation.agent, explanation.team, explanation.role
    );
    for eval in &explanation.evaluations {
        println!("\n  {:?}: {:.4}", eval.action, eval.score);
        for (feature, value) in eval.features.entries() {
            println!("    {:<20} {:.4}", feature.name(), value);
        }
    }
    println!("\nChosen: {:?}", explanation.chosen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_agents::Feature;

    #[test]
    fn test_default_role_by_index() {
        assert_eq!(default_role(0), Role::Offensive);
        assert_eq!(default_role(1), Role::Offensive);
        assert_eq!(default_role(2), Role::Defensive);
        assert_eq!(default_role(3), Role::Defensive);
    }

    #[test]
    fn test_explain_uses_agent_observation() {
        let layout = Layout::builtin().unwrap();
        let explanation = explain(&layout, 0, Role::Offensive, Some(4)).unwrap();

        // Both blue agents start far beyond sight range of agent 0
        assert!(!explanation.evaluations.is_empty());
        for eval in &explanation.evaluations {
            assert_eq!(eval.features.get(Feature::GhostThreat), Some(0.0));
        }
    }

    #[test]
    fn test_explained_choice_matches_play() {
        let layout = Layout::builtin().unwrap();
        let explanation = explain(&layout, 2, Role::Defensive, Some(9)).unwrap();

        let best = explanation
            .evaluations
            .iter()
            .map(|e| e.score)
            .fold(f64::NEG_INFINITY, f64::max);
        let chosen = explanation
            .evaluations
            .iter()
            .find(|e| e.action == explanation.chosen)
            .unwrap();
        assert_eq!(chosen.score, best);

        // Same seed, same observation: a play-side agent picks the same action
        let state = CaptureState::new(&layout);
        let mut agent = CaptureAgent::with_seed(2, Team::Red, Role::Defensive, 9).unwrap();
        agent.register_initial_state(&state).unwrap();
        let observation = state.observation_for(2).unwrap();
        assert_eq!(agent.choose_action(&observation).unwrap(), explanation.chosen);
    }

    #[test]
    fn test_explain_unknown_agent_fails() {
        let layout = Layout::builtin().unwrap();
        assert!(explain(&layout, 9, Role::Offensive, None).is_err());
    }
}
