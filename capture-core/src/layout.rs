//! Text maze layouts
//!
//! Layout characters:
//! - `%` wall
//! - `.` food
//! - `o` capsule (accepted, not modeled)
//! - `1`-`4` agent start (digit `n` is agent index `n - 1`)
//! - ` ` empty
//!
//! The first line is the top (northernmost) row.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::{Grid, Position};

/// Built-in two-versus-two layout (rotationally symmetric)
pub const DEFAULT_LAYOUT: &str = include_str!("../layouts/default.lay");

/// Maximum number of agents a layout may place
const MAX_AGENTS: usize = 4;

/// Parsed maze layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub walls: Grid,
    pub food: Grid,
    /// Start cell per agent index
    pub agent_starts: Vec<Position>,
}

impl Layout {
    /// Parse a layout from text
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let all: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();

        // Blank lines are only dropped around the maze; interior rows are kept as-is
        let first = match all.iter().position(|l| !l.trim().is_empty()) {
            Some(i) => i,
            None => return Err(invalid(0, "layout is empty")),
        };
        let last = all.iter().rposition(|l| !l.trim().is_empty()).unwrap_or(first);
        let lines = &all[first..=last];

        let width = lines[0].chars().count();
        let height = lines.len();
        let mut walls = Grid::new(width, height);
        let mut food = Grid::new(width, height);
        let mut starts: [Option<Position>; MAX_AGENTS] = [None; MAX_AGENTS];

        for (line_idx, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(invalid(
                    first + line_idx + 1,
                    format!("expected {} columns, found {}", width, line.chars().count()),
                ));
            }
            let y = (height - 1 - line_idx) as i32;
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::new(x as i32, y);
                match ch {
                    '%' => walls.set(pos, true),
                    '.' => food.set(pos, true),
                    ' ' | 'o' => {}
                    '1'..='4' => {
                        let agent = ch as usize - '1' as usize;
                        if starts[agent].is_some() {
                            return Err(invalid(first + line_idx + 1, format!("agent {} placed twice", ch)));
                        }
                        starts[agent] = Some(pos);
                    }
                    other => {
                        return Err(invalid(first + line_idx + 1, format!("unknown character {:?}", other)));
                    }
                }
            }
        }

        // Agents must be numbered 1..=n without gaps
        let agent_starts: Vec<Position> = starts.iter().map_while(|s| *s).collect();
        if starts[agent_starts.len()..].iter().any(Option::is_some) {
            return Err(invalid(0, "agent numbers must be contiguous from 1"));
        }
        if agent_starts.len() < 2 {
            return Err(invalid(0, "at least two agents are required"));
        }

        Ok(Self {
            walls,
            food,
            agent_starts,
        })
    }

    /// Load a layout file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            invalid(0, format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// The built-in layout
    pub fn builtin() -> Result<Self, GameError> {
        Self::parse(DEFAULT_LAYOUT)
    }

    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }
}

fn invalid(line: usize, reason: impl Into<String>) -> GameError {
    GameError::InvalidLayout {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_layout() {
        let layout = Layout::parse("%%%%%%\n%1. 2%\n%%%%%%\n").unwrap();
        assert_eq!(layout.width(), 6);
        assert_eq!(layout.height(), 3);
        assert_eq!(layout.agent_starts, vec![Position::new(1, 1), Position::new(4, 1)]);
        assert!(layout.food.get(Position::new(2, 1)));
        assert!(layout.walls.get(Position::new(0, 0)));
        assert!(!layout.walls.get(Position::new(3, 1)));
    }

    #[test]
    fn test_first_line_is_top_row() {
        let layout = Layout::parse("%%%%\n%1.%\n% 2%\n%%%%").unwrap();
        assert_eq!(layout.agent_starts[0], Position::new(1, 2));
        assert_eq!(layout.agent_starts[1], Position::new(2, 1));
    }

    #[test]
    fn test_default_layout() {
        let layout = Layout::builtin().unwrap();
        assert_eq!(layout.width(), 20);
        assert_eq!(layout.height(), 9);
        assert_eq!(layout.agent_starts.len(), 4);
        assert_eq!(layout.food.count(), 16);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Layout::parse("%%%%\n%1 2%\n%%%%").unwrap_err();
        assert!(matches!(err, GameError::InvalidLayout { line: 2, .. }));
    }

    #[test]
    fn test_surrounding_blank_lines_ignored() {
        let layout = Layout::parse("\n\n%%%%\n%1.%\n% 2%\n%%%%\n\n").unwrap();
        assert_eq!(layout.height(), 4);
        assert_eq!(layout.agent_starts[0], Position::new(1, 2));
    }

    #[test]
    fn test_interior_blank_row_kept() {
        // A row of spaces is open floor, not a separator
        let layout = Layout::parse("%%%%\n%1.%\n    \n% 2%\n%%%%").unwrap();
        assert_eq!(layout.height(), 5);
        assert_eq!(layout.agent_starts[0], Position::new(1, 3));
        assert_eq!(layout.agent_starts[1], Position::new(2, 1));
        assert!(!layout.walls.get(Position::new(0, 2)));

        let err = Layout::parse("%%%%\n%1.%\n\n% 2%\n%%%%").unwrap_err();
        assert!(matches!(err, GameError::InvalidLayout { line: 3, .. }));
    }

    #[test]
    fn test_unknown_character_rejected() {
        assert!(Layout::parse("%%%%\n%1x2\n%%%%").is_err());
    }

    #[test]
    fn test_agent_gap_rejected() {
        assert!(Layout::parse("%%%%%\n%1 3%\n%%%%%").is_err());
    }

    #[test]
    fn test_single_agent_rejected() {
        assert!(Layout::parse("%%%%\n%1 %\n%%%%").is_err());
    }
}
