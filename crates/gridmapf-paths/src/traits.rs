use gridmapf_core::{Bounds, Cell, Grid};

/// Minimal map interface needed by the search: extents and a
/// traversability query.
pub trait Traversable {
    /// Extents of the map. Cells outside are never expanded.
    fn bounds(&self) -> Bounds;

    /// Whether an agent may occupy `cell`. Only called for in-bounds cells.
    fn is_traversable(&self, cell: Cell) -> bool;
}

impl Traversable for Grid {
    #[inline]
    fn bounds(&self) -> Bounds {
        Grid::bounds(self)
    }

    #[inline]
    fn is_traversable(&self, cell: Cell) -> bool {
        Grid::is_traversable(self, cell)
    }
}
