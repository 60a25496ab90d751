//! Maze geometry: positions, actions, teams and boolean grids

use serde::{Deserialize, Serialize};

/// Grid coordinates. `y` grows northwards, `x` grows eastwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, ignoring walls
    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Position reached by taking `action` (no wall check)
    pub fn step(&self, action: Action) -> Position {
        let (dx, dy) = action.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

/// A single-step action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    /// All actions in enumeration order
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stop,
    ];

    /// Direction vector (dx, dy)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }
}

/// Team color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Red agents have even indices, blue agents odd ones
    pub fn of_agent(index: usize) -> Self {
        if index % 2 == 0 {
            Team::Red
        } else {
            Team::Blue
        }
    }

    /// Slot of this team in per-team arrays
    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Column adjacent to the dividing line on this team's side
    pub fn border_column(self, width: usize) -> i32 {
        let half = (width / 2) as i32;
        match self {
            Team::Red => half - 1,
            Team::Blue => half,
        }
    }

    /// Red owns the west half, blue the east half
    pub fn is_home(self, pos: Position, width: usize) -> bool {
        let half = (width / 2) as i32;
        match self {
            Team::Red => pos.x < half,
            Team::Blue => pos.x >= half,
        }
    }

    /// Sign applied to score changes made by this team
    pub fn score_sign(self) -> i32 {
        match self {
            Team::Red => 1,
            Team::Blue => -1,
        }
    }
}

/// Width x height boolean grid (walls, food)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies on the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.x as usize * self.height + pos.y as usize)
        } else {
            None
        }
    }

    /// Cell value; off-grid positions read as `false`
    pub fn get(&self, pos: Position) -> bool {
        self.index(pos).map_or(false, |i| self.cells[i])
    }

    /// Set a cell; off-grid positions are ignored
    pub fn set(&mut self, pos: Position, value: bool) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = value;
        }
    }

    /// Number of true cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// All true cells, column-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height)
                .map(move |y| Position::new(x as i32, y as i32))
                .filter(move |&p| self.get(p))
        })
    }

    /// Cells of `column` whose value is false (open cells when this is a wall grid)
    pub fn open_cells_in_column(&self, column: i32) -> Vec<Position> {
        if column < 0 || column as usize >= self.width {
            return Vec::new();
        }
        (0..self.height as i32)
            .map(|y| Position::new(column, y))
            .filter(|&p| !self.get(p))
            .collect()
    }
}
