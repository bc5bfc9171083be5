//! Per-agent search state.

use std::collections::HashMap;

use gridmapf_core::{Bounds, Cell};

use crate::node::{NodeQueue, SearchNode, UNREACHABLE};
use crate::occupancy::OccupancyTable;
use crate::reconstruct::reconstruct_path;
use crate::traits::Traversable;

/// Where an agent's search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentStatus {
    /// The queue still holds nodes to expand.
    Active,
    /// The goal was popped and a path was produced.
    Reached,
    /// The queue ran empty before the goal was popped.
    Exhausted,
}

/// Result of a single [`AgentFrontier::expand`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// A node was expanded; `accepted` neighbours were pushed and claimed.
    Expanded { accepted: usize },
    /// The goal was popped. Holds the start-to-goal path.
    Reached(Vec<Cell>),
    /// The queue ran empty; the goal cannot be reached any more.
    Exhausted,
    /// The frontier had already terminated, so nothing was done.
    Terminated,
}

/// The search state of one agent: its queue, distance table, predecessor
/// map and goal.
///
/// A frontier never looks at another frontier. The only thing agents share
/// is the [`OccupancyTable`] passed into [`expand`](Self::expand).
#[derive(Debug)]
pub struct AgentFrontier {
    agent: usize,
    start: Cell,
    end: Cell,
    bounds: Bounds,
    queue: NodeQueue,
    distances: Vec<i32>,
    predecessors: HashMap<Cell, Option<Cell>>,
    status: AgentStatus,
    expansions: usize,
}

impl AgentFrontier {
    /// Create the frontier for `agent`, seeded with `start` at distance 0.
    ///
    /// `start` and `end` must lie inside `map`; the caller validates them.
    pub fn new<G: Traversable>(map: &G, agent: usize, start: Cell, end: Cell) -> Self {
        let bounds = map.bounds();
        let mut distances = vec![UNREACHABLE; bounds.len()];
        if let Some(i) = bounds.index(start) {
            distances[i] = 0;
        }
        let mut queue = NodeQueue::new();
        queue.push(SearchNode {
            distance: 0,
            cell: start,
            time: 0,
        });
        let mut predecessors = HashMap::new();
        predecessors.insert(start, None);
        Self {
            agent,
            start,
            end,
            bounds,
            queue,
            distances,
            predecessors,
            status: AgentStatus::Active,
            expansions: 0,
        }
    }

    #[inline]
    pub fn agent(&self) -> usize {
        self.agent
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Cell {
        self.end
    }

    #[inline]
    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Number of nodes waiting in the queue.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Number of nodes popped so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Best known distance to `cell`, or [`UNREACHABLE`].
    pub fn distance(&self, cell: Cell) -> i32 {
        match self.bounds.index(cell) {
            Some(i) => self.distances[i],
            None => UNREACHABLE,
        }
    }

    /// Predecessor of `cell` on its best known route. The outer `None`
    /// means `cell` was never reached; `Some(None)` marks the start.
    pub fn predecessor(&self, cell: Cell) -> Option<Option<Cell>> {
        self.predecessors.get(&cell).copied()
    }

    /// Perform one expansion step against the shared occupancy table.
    ///
    /// Pops the lowest-distance node. If it is the goal, the path is
    /// reconstructed and the frontier becomes [`AgentStatus::Reached`].
    /// Otherwise each in-bounds traversable neighbour (up, down, left,
    /// right) is accepted when it improves the recorded distance and its
    /// `(cell, time + 1)` slot is unclaimed; accepted slots are claimed at
    /// once. When the queue is left empty the frontier becomes
    /// [`AgentStatus::Exhausted`].
    pub fn expand<G: Traversable>(&mut self, map: &G, occupancy: &mut OccupancyTable) -> Expansion {
        if self.status != AgentStatus::Active {
            return Expansion::Terminated;
        }
        let Some(current) = self.queue.pop() else {
            self.status = AgentStatus::Exhausted;
            return Expansion::Exhausted;
        };
        self.expansions += 1;

        if current.cell == self.end {
            self.status = AgentStatus::Reached;
            return Expansion::Reached(reconstruct_path(&self.predecessors, self.end));
        }

        let new_distance = current.distance + 1;
        let new_time = current.time + 1;
        let mut accepted = 0;

        for next in current.cell.neighbors_4() {
            let Some(ni) = self.bounds.index(next) else {
                continue;
            };
            if !map.is_traversable(next) {
                continue;
            }
            if new_distance >= self.distances[ni] || occupancy.is_claimed(next, new_time) {
                continue;
            }
            self.distances[ni] = new_distance;
            self.queue.push(SearchNode {
                distance: new_distance,
                cell: next,
                time: new_time,
            });
            self.predecessors.insert(next, Some(current.cell));
            occupancy.claim(next, new_time);
            accepted += 1;
        }

        if self.queue.is_empty() {
            self.status = AgentStatus::Exhausted;
            return Expansion::Exhausted;
        }
        Expansion::Expanded { accepted }
    }
}
