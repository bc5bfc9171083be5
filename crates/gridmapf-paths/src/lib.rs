//! Collision-aware shortest paths for several agents on a shared grid.
//!
//! Every agent runs its own uniform-cost search over `(cell, time)` states.
//! The searches are interleaved round-robin, one expansion step per agent
//! per round, and share a single [`OccupancyTable`] of claimed cell-time
//! slots: once an agent pushes a node for `cell` at step `t`, no other agent
//! may enter `cell` at step `t`. The result is one path per agent that
//! reached its goal, with no two paths on the same cell at the same step.
//!
//! ```
//! use gridmapf_core::{Cell, Grid};
//! use gridmapf_paths::search;
//!
//! let grid = Grid::new(3, 3);
//! let paths = search(&grid, &[(Cell::new(0, 0), Cell::new(2, 2))]).unwrap();
//! assert_eq!(paths[0].len(), 5);
//! ```
//!
//! # Components
//!
//! | Type | Role |
//! |---|---|
//! | [`TimeExpandedSearch`] | owns the frontiers and the occupancy table, runs rounds |
//! | [`AgentFrontier`] | one agent's queue, distance table and predecessor map |
//! | [`OccupancyTable`] | claimed `(cell, time)` slots, shared by all agents |
//! | [`reconstruct_path`] | predecessor map to start-to-goal cell sequence |
//!
//! Edge (swap) collisions are not prevented: two agents may trade places
//! across one edge in the same step.

mod error;
mod frontier;
mod node;
mod occupancy;
mod reconstruct;
mod search;
mod traits;
mod validate;

pub use error::{EndpointIssue, EndpointRole, SearchError};
pub use frontier::{AgentFrontier, AgentStatus, Expansion};
pub use node::{SearchNode, UNREACHABLE};
pub use occupancy::{Claim, OccupancyTable};
pub use reconstruct::reconstruct_path;
pub use search::{AgentPath, RoundReport, TimeExpandedSearch, search};
pub use traits::Traversable;
pub use validate::{Collision, find_collisions, is_connected_path};
