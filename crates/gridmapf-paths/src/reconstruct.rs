use std::collections::HashMap;

use gridmapf_core::Cell;

/// Rebuild the path ending at `goal` from a predecessor map.
///
/// Follows predecessor links from `goal` until a cell mapped to `None` (the
/// start) and returns the cells in start-to-goal order. Returns an empty
/// path if `goal` was never recorded, or if the links loop or dangle.
pub fn reconstruct_path(predecessors: &HashMap<Cell, Option<Cell>>, goal: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut step = goal;
    // A well-formed map reaches the start in at most `len` links.
    for _ in 0..predecessors.len() {
        let Some(&prev) = predecessors.get(&step) else {
            return Vec::new();
        };
        path.push(step);
        match prev {
            Some(p) => step = p,
            None => {
                path.reverse();
                return path;
            }
        }
    }
    Vec::new()
}
