//! Capture Agents - Reactive decision agents for capture-the-flag
//!
//! This crate provides the decision side of the game:
//! - Feature and weight vectors over a fixed per-role schema
//! - Offensive and defensive heuristics
//! - One-ply action evaluation
//! - Greedy action selection with random tie-breaking
//! - Agents and team creation

pub mod features;
pub mod role;
pub mod offense;
pub mod defense;
pub mod eval;
pub mod selector;
pub mod agent;
pub mod team;
pub mod error;

// Re-exports for convenient access
pub use features::{Feature, FeatureContext, FeatureVector, WeightVector};
pub use role::{Heuristic, Role};
pub use offense::Offense;
pub use defense::Defense;
pub use eval::{Evaluation, Evaluator};
pub use selector::{best_actions, select_best};
pub use agent::{CaptureAgent, INIT_BUDGET};
pub use team::{create_team, TeamOptions};
pub use error::AgentError;
