//! Capture Core - Maze engine for capture-the-flag
//!
//! This crate provides the game side that agents decide against:
//! - Maze geometry (positions, actions, teams, boolean grids)
//! - Text layouts
//! - The `WorldState` trait agents are written against
//! - A reference rules engine (`CaptureState`)
//! - All-pairs maze distances

pub mod grid;
pub mod layout;
pub mod world;
pub mod game;
pub mod distance;
pub mod error;

// Re-exports for convenient access
pub use grid::{Action, Grid, Position, Team};
pub use layout::{Layout, DEFAULT_LAYOUT};
pub use world::{AgentState, WorldState};
pub use game::{CaptureState, GameResult, DEFAULT_MAX_MOVES, MIN_FOOD, SIGHT_RANGE};
pub use distance::Distancer;
pub use error::GameError;
