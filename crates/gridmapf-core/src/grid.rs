//! The [`Grid`] type: an immutable traversability matrix.
//!
//! A grid is built once (by hand, from text, or by a generator) and then
//! only read. Searches borrow it for their whole run.

use thiserror::Error;

use crate::geom::{Bounds, Cell};

/// The state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Traversable,
    Blocked,
}

impl Tile {
    /// Character used by [`Grid::parse`] and the text rendering.
    pub const fn as_char(self) -> char {
        match self {
            Tile::Traversable => '.',
            Tile::Blocked => '#',
        }
    }

    fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '.' => Some(Tile::Traversable),
            '#' => Some(Tile::Blocked),
            _ => None,
        }
    }
}

impl From<bool> for Tile {
    /// `true` means traversable.
    fn from(traversable: bool) -> Self {
        if traversable {
            Tile::Traversable
        } else {
            Tile::Blocked
        }
    }
}

/// Errors returned by [`Grid::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// The input contains no rows.
    #[error("grid: empty input")]
    Empty,
    /// A row's width differs from the first row.
    #[error("grid: row {row} has width {found}, expected {expected}")]
    InconsistentWidth {
        row: i32,
        expected: i32,
        found: i32,
    },
    /// A character other than `.` or `#` was found.
    #[error("grid: invalid character '{ch}' at {cell}")]
    InvalidChar { ch: char, cell: Cell },
}

/// A `rows × cols` matrix of [`Tile`]s, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    bounds: Bounds,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            bounds: Bounds,
            tiles: Vec<Tile>,
        }

        let Raw { bounds, tiles } = Raw::deserialize(deserializer)?;
        if tiles.len() != bounds.len() {
            return Err(serde::de::Error::custom(format_args!(
                "grid {bounds} needs {} tiles, found {}",
                bounds.len(),
                tiles.len()
            )));
        }
        Ok(Self { bounds, tiles })
    }
}

impl Grid {
    /// Create a grid where every cell is traversable.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            tiles: vec![Tile::Traversable; bounds.len()],
        }
    }

    /// Create a grid from row-major tiles.
    ///
    /// Missing tiles are filled as traversable and extra tiles are dropped,
    /// so the grid always has exactly `rows * cols` cells.
    pub fn from_tiles(rows: i32, cols: i32, mut tiles: Vec<Tile>) -> Self {
        let bounds = Bounds::new(rows, cols);
        tiles.resize(bounds.len(), Tile::Traversable);
        Self { bounds, tiles }
    }

    /// Create a grid from rows of booleans (`true` = traversable).
    ///
    /// The width is taken from the first row; shorter rows are padded with
    /// traversable cells.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            tiles.extend((0..cols).map(|c| Tile::from(row.get(c).copied().unwrap_or(true))));
        }
        Self::from_tiles(rows.len() as i32, cols as i32, tiles)
    }

    /// Parse a grid from text: one line per row, `.` traversable and `#`
    /// blocked.
    ///
    /// Surrounding whitespace is trimmed from the whole input and from each
    /// line, so indented literals are accepted.
    pub fn parse(s: &str) -> Result<Self, GridParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GridParseError::Empty);
        }
        let mut tiles = Vec::new();
        let mut width: i32 = -1;
        let mut rows: i32 = 0;
        for (row, line) in s.lines().enumerate() {
            let row = row as i32;
            let mut col: i32 = 0;
            for ch in line.trim().chars() {
                let tile = Tile::from_char(ch).ok_or(GridParseError::InvalidChar {
                    ch,
                    cell: Cell::new(row, col),
                })?;
                tiles.push(tile);
                col += 1;
            }
            if width < 0 {
                width = col;
            } else if col != width {
                return Err(GridParseError::InconsistentWidth {
                    row,
                    expected: width,
                    found: col,
                });
            }
            rows += 1;
        }
        Ok(Self::from_tiles(rows, width, tiles))
    }

    /// Return a copy of this grid with the given cells blocked.
    ///
    /// Out-of-bounds cells are ignored.
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        for c in cells {
            if let Some(i) = self.bounds.index(c) {
                self.tiles[i] = Tile::Blocked;
            }
        }
        self
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    /// The tile at `c`, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, c: Cell) -> Option<Tile> {
        self.bounds.index(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is inside the grid and traversable.
    #[inline]
    pub fn is_traversable(&self, c: Cell) -> bool {
        self.tile(c) == Some(Tile::Traversable)
    }

    /// Number of traversable cells.
    pub fn traversable_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|&&t| t == Tile::Traversable)
            .count()
    }

    /// Row-major iterator over `(Cell, Tile)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

/// Iterator over `(Cell, Tile)` pairs of a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: crate::geom::BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Cell, Tile);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        self.grid.tile(c).map(|t| (c, t))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Cell, Tile);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
....
.##.
....";

    #[test]
    fn new_is_all_traversable() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.traversable_count(), 12);
        assert!(g.is_traversable(Cell::new(2, 3)));
        assert!(!g.is_traversable(Cell::new(3, 0)));
        assert_eq!(g.tile(Cell::new(-1, 0)), None);
    }

    #[test]
    fn parse_room() {
        let g = Grid::parse(ROOM).unwrap();
        assert_eq!(g.bounds(), Bounds::new(3, 4));
        assert_eq!(g.tile(Cell::new(1, 1)), Some(Tile::Blocked));
        assert_eq!(g.tile(Cell::new(1, 3)), Some(Tile::Traversable));
        assert_eq!(g.traversable_count(), 10);
    }

    #[test]
    fn parse_accepts_indented_lines() {
        let g = Grid::parse(
            "
            .#
            ..
            ",
        )
        .unwrap();
        assert_eq!(g.bounds(), Bounds::new(2, 2));
        assert!(!g.is_traversable(Cell::new(0, 1)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Grid::parse("  \n "), Err(GridParseError::Empty));
        assert_eq!(
            Grid::parse("...\n.."),
            Err(GridParseError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::parse("..\n.x"),
            Err(GridParseError::InvalidChar {
                ch: 'x',
                cell: Cell::new(1, 1)
            })
        );
    }

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            Grid::parse("..\n.x").unwrap_err().to_string(),
            "grid: invalid character 'x' at (1, 1)"
        );
        assert_eq!(
            Grid::parse("...\n..").unwrap_err().to_string(),
            "grid: row 1 has width 2, expected 3"
        );
    }

    #[test]
    fn from_rows_and_with_blocked() {
        let g = Grid::from_rows(&[vec![true, false], vec![true, true]]);
        assert_eq!(g.tile(Cell::new(0, 1)), Some(Tile::Blocked));
        let g = g.with_blocked([Cell::new(1, 0), Cell::new(9, 9)]);
        assert_eq!(g.traversable_count(), 2);
    }

    #[test]
    fn iter_row_major() {
        let g = Grid::parse(ROOM).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 12);
        assert_eq!(items[5], (Cell::new(1, 1), Tile::Blocked));
        let text: String = g.iter().map(|(_, t)| t.as_char()).collect();
        assert_eq!(text, ".....##.....");
    }
}
