//! Board dimensions supported by the engine.

use serde::{Deserialize, Serialize};

use crate::Position;

/// The side length of a board, with its box geometry.
///
/// Two sizes exist: 6×6 boards are divided into 2×3 boxes and 9×9 boards
/// into 3×3 boxes. Classic and killer games always use [`BoardSize::Nine`];
/// memory games pick the size from the difficulty.
///
/// # Examples
///
/// ```
/// use sumoku_core::BoardSize;
///
/// let size = BoardSize::Six;
/// assert_eq!(size.side(), 6);
/// assert_eq!(size.cell_count(), 36);
/// assert_eq!((size.box_rows(), size.box_cols()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    /// A 6×6 board with 2×3 boxes, values 1-6.
    Six,
    /// A 9×9 board with 3×3 boxes, values 1-9.
    Nine,
}

impl BoardSize {
    /// Returns the side length (6 or 9).
    #[must_use]
    pub const fn side(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Nine => 9,
        }
    }

    /// Returns the total number of cells on the board (36 or 81).
    #[must_use]
    pub const fn cell_count(self) -> usize {
        let side = self.side() as usize;
        side * side
    }

    /// Returns the number of rows in each box (2 or 3).
    #[must_use]
    pub const fn box_rows(self) -> u8 {
        match self {
            Self::Six => 2,
            Self::Nine => 3,
        }
    }

    /// Returns the number of columns in each box (3 for both sizes).
    #[must_use]
    pub const fn box_cols(self) -> u8 {
        3
    }

    /// Returns the largest valid cell value (equal to the side length).
    #[must_use]
    pub const fn max_value(self) -> u8 {
        self.side()
    }

    /// Returns the valid cell values `1..=N` in ascending order.
    #[must_use]
    pub fn values(self) -> std::ops::RangeInclusive<u8> {
        1..=self.side()
    }

    /// Returns all board positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let side = self.side();
        (0..side).flat_map(move |row| (0..side).map(move |col| Position::new(row, col)))
    }

    /// Looks up the size for a side length.
    #[must_use]
    pub const fn from_side(side: u8) -> Option<Self> {
        match side {
            6 => Some(Self::Six),
            9 => Some(Self::Nine),
            _ => None,
        }
    }

    /// Returns the position of the top-left cell of the box containing `pos`.
    #[must_use]
    pub fn box_origin(self, pos: Position) -> Position {
        let row = pos.row / self.box_rows() * self.box_rows();
        let col = pos.col / self.box_cols() * self.box_cols();
        Position::new(row, col)
    }

    /// Returns all positions in the box containing `pos`, in row-major order.
    pub fn box_positions(self, pos: Position) -> impl Iterator<Item = Position> {
        let origin = self.box_origin(pos);
        (0..self.box_rows()).flat_map(move |dr| {
            (0..self.box_cols()).map(move |dc| Position::new(origin.row + dr, origin.col + dc))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry() {
        assert_eq!(BoardSize::Six.cell_count(), 36);
        assert_eq!(BoardSize::Nine.cell_count(), 81);
        assert_eq!(BoardSize::Six.values().collect::<Vec<_>>(), vec![
            1, 2, 3, 4, 5, 6
        ]);
        assert_eq!(BoardSize::from_side(9), Some(BoardSize::Nine));
        assert_eq!(BoardSize::from_side(4), None);
    }

    #[test]
    fn test_positions_are_row_major() {
        let positions: Vec<_> = BoardSize::Six.positions().collect();
        assert_eq!(positions.len(), 36);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[5], Position::new(0, 5));
        assert_eq!(positions[6], Position::new(1, 0));
        assert_eq!(positions[35], Position::new(5, 5));
    }

    #[test]
    fn test_box_origin_six() {
        // 6x6 boxes are 2 rows by 3 columns
        let size = BoardSize::Six;
        assert_eq!(size.box_origin(Position::new(0, 0)), Position::new(0, 0));
        assert_eq!(size.box_origin(Position::new(1, 2)), Position::new(0, 0));
        assert_eq!(size.box_origin(Position::new(2, 3)), Position::new(2, 3));
        assert_eq!(size.box_origin(Position::new(5, 5)), Position::new(4, 3));
    }

    #[test]
    fn test_box_positions_nine() {
        let cells: Vec<_> = BoardSize::Nine
            .box_positions(Position::new(4, 4))
            .collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Position::new(3, 3));
        assert_eq!(cells[8], Position::new(5, 5));
    }
}
