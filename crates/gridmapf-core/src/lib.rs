//! **gridmapf-core**: grid types for time-expanded multi-agent pathfinding.
//!
//! This crate provides the foundational types shared across the *gridmapf*
//! workspace: `(row, col)` cell coordinates, grid bounds, and the immutable
//! traversability [`Grid`] that searches run on.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, BoundsIter, Cell, manhattan};
pub use grid::{Grid, GridIter, GridParseError, Tile};
