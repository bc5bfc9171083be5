//! Geometry primitives: [`Cell`] coordinates and grid [`Bounds`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downward, columns grow to
//! the right, and both start at zero.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate.
///
/// A `Cell` is only meaningful relative to some [`Bounds`]; it is valid iff
/// `0 <= row < rows` and `0 <= col < cols`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four axis-aligned neighbours in the order up, down, left, right.
    ///
    /// Searches iterate this array as-is, so the order determines which
    /// neighbour claims a contested slot first.
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is one axis-aligned step away from `self`.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        manhattan(self, other) == 1
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extents of a `rows × cols` grid anchored at the origin.
///
/// Negative dimensions are clamped to zero on construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bounds {
    rows: i32,
    cols: i32,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Bounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            rows: i32,
            cols: i32,
        }

        let Raw { rows, cols } = Raw::deserialize(deserializer)?;
        if rows < 0 || cols < 0 {
            return Err(serde::de::Error::custom(format_args!(
                "negative grid dimensions {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }
}

impl Bounds {
    /// Create bounds for a `rows × cols` grid.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    #[inline]
    pub fn rows(self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds have zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the bounds.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.cols as usize) + c.col as usize)
    }

    /// Convert a flat index back to a cell. The index is not range-checked.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bounds.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(1, 2);
        let b = Cell::new(3, 4);
        assert_eq!(a + b, Cell::new(4, 6));
        assert_eq!(b - a, Cell::new(2, 2));
        assert_eq!(Cell::from((5, 7)), Cell::new(5, 7));
    }

    #[test]
    fn neighbors_are_up_down_left_right() {
        let n = Cell::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Cell::new(1, 2),
                Cell::new(3, 2),
                Cell::new(2, 1),
                Cell::new(2, 3)
            ]
        );
        assert!(n.iter().all(|&c| c.is_adjacent(Cell::new(2, 2))));
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Cell::new(0, 0), Cell::new(2, 2)), 4);
        assert_eq!(manhattan(Cell::new(3, 1), Cell::new(1, 4)), 5);
        assert_eq!(manhattan(Cell::new(1, 1), Cell::new(1, 1)), 0);
    }

    #[test]
    fn bounds_contains() {
        let b = Bounds::new(2, 3);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(1, 2)));
        assert!(!b.contains(Cell::new(2, 0)));
        assert!(!b.contains(Cell::new(0, 3)));
        assert!(!b.contains(Cell::new(-1, 0)));
    }

    #[test]
    fn bounds_index_roundtrip() {
        let b = Bounds::new(3, 4);
        for (i, c) in b.iter().enumerate() {
            assert_eq!(b.index(c), Some(i));
            assert_eq!(b.cell(i), c);
        }
        assert_eq!(b.index(Cell::new(3, 0)), None);
    }

    #[test]
    fn bounds_iter_row_major() {
        let b = Bounds::new(2, 3);
        let cells: Vec<_> = b.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(1, 0));
        assert_eq!(cells[5], Cell::new(1, 2));
        assert_eq!(b.iter().size_hint(), (6, Some(6)));
    }

    #[test]
    fn negative_bounds_clamp_to_empty() {
        let b = Bounds::new(-2, 5);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }
}
