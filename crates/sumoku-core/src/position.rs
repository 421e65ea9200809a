//! Board position types.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::BoardSize;

/// A cell coordinate on the board.
///
/// Positions order row-major: first by row, then by column. This ordering is
/// load-bearing for killer cages, where the first cell in sorted order
/// carries the target label and the sorted sequence fixes the operand order
/// of the cage formula.
///
/// # Examples
///
/// ```
/// use sumoku_core::{BoardSize, Position};
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.index(BoardSize::Nine), 4 * 9 + 7);
/// assert!(Position::new(4, 8) > pos);
/// assert!(Position::new(5, 0) > Position::new(4, 8));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("r{row}c{col}")]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: u8,
    /// Column index, 0 at the left.
    pub col: u8,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row-major linear index of this position.
    #[must_use]
    pub fn index(self, size: BoardSize) -> usize {
        debug_assert!(self.row < size.side() && self.col < size.side());
        usize::from(self.row) * usize::from(size.side()) + usize::from(self.col)
    }

    /// Returns the position for a row-major linear index.
    #[must_use]
    pub fn from_index(index: usize, size: BoardSize) -> Self {
        debug_assert!(index < size.cell_count());
        let side = usize::from(size.side());
        #[expect(clippy::cast_possible_truncation)]
        Self::new((index / side) as u8, (index % side) as u8)
    }

    /// Returns the 4-directionally adjacent positions that lie on the board.
    ///
    /// Corner cells have two neighbors, edge cells three, interior cells
    /// four.
    pub fn neighbors(self, size: BoardSize) -> impl Iterator<Item = Self> {
        const DIRECTIONS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let row = u8::try_from(i16::from(self.row) + dr).ok()?;
            let col = u8::try_from(i16::from(self.col) + dc).ok()?;
            (row < size.side() && col < size.side()).then_some(Self::new(row, col))
        })
    }

    /// Returns the city-block (Manhattan) distance to another position.
    #[must_use]
    pub fn city_block_distance(self, other: Self) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for size in [BoardSize::Six, BoardSize::Nine] {
            for pos in size.positions() {
                assert_eq!(Position::from_index(pos.index(size), size), pos);
            }
        }
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let corner: Vec<_> = Position::new(0, 0).neighbors(BoardSize::Nine).collect();
        assert_eq!(corner, vec![Position::new(1, 0), Position::new(0, 1)]);

        let interior: Vec<_> = Position::new(4, 4).neighbors(BoardSize::Nine).collect();
        assert_eq!(interior.len(), 4);

        // The 6x6 bound applies, not the 9x9 one
        let edge: Vec<_> = Position::new(5, 5).neighbors(BoardSize::Six).collect();
        assert_eq!(edge, vec![Position::new(4, 5), Position::new(5, 4)]);
    }

    #[test]
    fn test_city_block_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 5);
        assert_eq!(a.city_block_distance(b), 8);
        assert_eq!(b.city_block_distance(a), 8);
        assert_eq!(a.city_block_distance(a), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, 7).to_string(), "r2c7");
    }
}
