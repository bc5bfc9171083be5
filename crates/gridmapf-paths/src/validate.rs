//! Checks for search results: vertex collisions and path connectivity.

use std::collections::HashMap;

use gridmapf_core::Cell;

use crate::search::AgentPath;
use crate::traits::Traversable;

/// Two agents standing on the same cell at the same time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collision {
    pub cell: Cell,
    pub time: usize,
    /// The agent seen first in the input order, then the other one.
    pub agents: (usize, usize),
}

/// Find every vertex collision between distinct paths.
///
/// Only the time steps a path actually covers are compared; an agent is not
/// considered to linger on its goal afterwards. Collisions are reported in
/// the order they are found (path by path, then by time).
pub fn find_collisions(paths: &[AgentPath]) -> Vec<Collision> {
    let mut seen: HashMap<(Cell, usize), usize> = HashMap::new();
    let mut collisions = Vec::new();
    for path in paths {
        for (time, &cell) in path.cells.iter().enumerate() {
            match seen.get(&(cell, time)) {
                Some(&other) if other != path.agent => collisions.push(Collision {
                    cell,
                    time,
                    agents: (other, path.agent),
                }),
                Some(_) => {}
                None => {
                    seen.insert((cell, time), path.agent);
                }
            }
        }
    }
    collisions
}

/// Whether `cells` is a walk of 4-connected traversable cells from `start`
/// to `end`.
pub fn is_connected_path<G: Traversable>(map: &G, cells: &[Cell], start: Cell, end: Cell) -> bool {
    let (Some(&first), Some(&last)) = (cells.first(), cells.last()) else {
        return false;
    };
    if first != start || last != end {
        return false;
    }
    let bounds = map.bounds();
    if !cells
        .iter()
        .all(|&c| bounds.contains(c) && map.is_traversable(c))
    {
        return false;
    }
    cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
}
