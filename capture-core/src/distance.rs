//! Maze distances
//!
//! [`Distancer`] precomputes the shortest path length between every pair of
//! open cells with one breadth-first search per cell. Lookups are then O(1).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::grid::{Action, Grid, Position};

/// Marker for pairs with no path between them
const UNREACHABLE: u32 = u32::MAX;

/// All-pairs maze distance table for one wall layout
#[derive(Clone, Debug)]
pub struct Distancer {
    /// Open cell -> dense index
    cells: FxHashMap<Position, usize>,
    /// Row-major `cells.len() x cells.len()` distance matrix
    distances: Vec<u32>,
}

impl Distancer {
    /// Compute distances for every pair of open cells in `walls`
    pub fn new(walls: &Grid) -> Self {
        let mut cells = FxHashMap::default();
        for x in 0..walls.width() as i32 {
            for y in 0..walls.height() as i32 {
                let pos = Position::new(x, y);
                if !walls.get(pos) {
                    let next = cells.len();
                    cells.insert(pos, next);
                }
            }
        }

        let n = cells.len();
        let mut distances = vec![UNREACHABLE; n * n];
        let mut queue = VecDeque::with_capacity(n);

        for (&source, &src_idx) in &cells {
            let row = &mut distances[src_idx * n..(src_idx + 1) * n];
            row[src_idx] = 0;
            queue.clear();
            queue.push_back(source);

            while let Some(pos) = queue.pop_front() {
                let d = row[cells[&pos]];
                for action in [Action::North, Action::South, Action::East, Action::West] {
                    let next = pos.step(action);
                    if let Some(&next_idx) = cells.get(&next) {
                        if row[next_idx] == UNREACHABLE {
                            row[next_idx] = d + 1;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        Self { cells, distances }
    }

    /// Shortest path length between two cells.
    ///
    /// Returns `None` if either cell is a wall or off the board, or if no path exists.
    pub fn distance(&self, a: Position, b: Position) -> Option<u32> {
        let i = *self.cells.get(&a)?;
        let j = *self.cells.get(&b)?;
        match self.distances[i * self.cells.len() + j] {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Smallest distance from `from` to any of `targets` (unreachable targets skipped)
    pub fn nearest<I>(&self, from: Position, targets: I) -> Option<u32>
    where
        I: IntoIterator<Item = Position>,
    {
        targets
            .into_iter()
            .filter_map(|t| self.distance(from, t))
            .min()
    }

    /// Number of open cells covered by the table
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }
}
