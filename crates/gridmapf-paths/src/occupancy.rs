//! Shared registry of claimed `(cell, time)` slots.

use std::collections::HashSet;

use gridmapf_core::Cell;

/// A single reservation: `cell` is occupied at time step `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Claim {
    pub cell: Cell,
    pub time: i32,
}

/// The set of cell-time slots claimed so far in one search run.
///
/// Claims are only ever added, so [`len`](Self::len) never decreases.
/// A table belongs to exactly one [`TimeExpandedSearch`](crate::TimeExpandedSearch)
/// and is handed to each frontier by `&mut` during its expansion step.
#[derive(Debug, Clone, Default)]
pub struct OccupancyTable {
    claims: HashSet<Claim>,
}

impl OccupancyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cell` is already claimed at `time`.
    #[inline]
    pub fn is_claimed(&self, cell: Cell, time: i32) -> bool {
        self.claims.contains(&Claim { cell, time })
    }

    /// Claim `cell` at `time`. Returns `false` if it was already claimed.
    #[inline]
    pub fn claim(&mut self, cell: Cell, time: i32) -> bool {
        self.claims.insert(Claim { cell, time })
    }

    /// Number of claimed slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over all claims in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    /// Cells claimed at `time`, in unspecified order.
    pub fn claimed_at(&self, time: i32) -> impl Iterator<Item = Cell> + '_ {
        self.claims
            .iter()
            .filter(move |c| c.time == time)
            .map(|c| c.cell)
    }
}
