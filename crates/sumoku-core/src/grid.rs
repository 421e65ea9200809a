//! The cell grid shared by puzzles, solutions, and player boards.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display as DeriveDisplay, Error};
use serde::{Deserialize, Serialize};

use crate::{BoardSize, Position};

/// An N×N matrix of cell values, where 0 marks an empty cell.
///
/// The board size is fixed at creation; only cell values change. Values are
/// stored row-major. A grid with every cell in `1..=N` is a candidate
/// solution; a grid with zeroes is a puzzle or an in-progress board.
///
/// # Text format
///
/// [`Display`] and [`FromStr`] use a compact text form: one row per line,
/// `_` for empty cells, a space between box column groups. Whitespace is
/// insignificant when parsing.
///
/// ```
/// use sumoku_core::Grid;
///
/// let grid: Grid = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()
/// .unwrap();
///
/// assert_eq!(grid.filled_count(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: BoardSize,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    #[must_use]
    pub fn empty(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
        }
    }

    /// Creates a grid from row-major cell values.
    ///
    /// # Panics
    ///
    /// Panics if `cells` has the wrong length or contains a value greater
    /// than the board's maximum.
    #[must_use]
    pub fn from_cells(size: BoardSize, cells: Vec<u8>) -> Self {
        assert_eq!(cells.len(), size.cell_count(), "wrong cell count");
        assert!(
            cells.iter().all(|&v| v <= size.max_value()),
            "cell value out of range for {}x{} board",
            size.side(),
            size.side()
        );
        Self { size, cells }
    }

    /// Returns the board size.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the value at `pos` (0 if empty).
    #[must_use]
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.index(self.size)]
    }

    /// Sets the value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is greater than the board's maximum.
    pub fn set(&mut self, pos: Position, value: u8) {
        assert!(value <= self.size.max_value(), "value out of range");
        let index = pos.index(self.size);
        self.cells[index] = value;
    }

    /// Empties the cell at `pos`.
    pub fn clear(&mut self, pos: Position) {
        let index = pos.index(self.size);
        self.cells[index] = 0;
    }

    /// Returns `true` if the cell at `pos` is empty.
    #[must_use]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == 0
    }

    /// Returns the first empty cell in row-major order, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|&v| v == 0)
            .map(|index| Position::from_index(index, self.size))
    }

    /// Returns the number of filled (non-zero) cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.filled_count()
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Returns all positions of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        self.size.positions()
    }

    /// Returns the row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size.side() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size.side() {
                if col > 0 && col % self.size.box_cols() == 0 {
                    write!(f, " ")?;
                }
                match self.get(Position::new(row, col)) {
                    0 => write!(f, "_")?,
                    v => write!(f, "{v}")?,
                }
            }
        }
        Ok(())
    }
}

/// Error parsing a [`Grid`] from its text form.
#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay, Error)]
pub enum ParseGridError {
    /// The character is neither a digit nor `_`.
    #[display("invalid cell character {_0:?}")]
    InvalidCharacter(#[error(not(source))] char),
    /// The number of cells matches no supported board size.
    #[display("{_0} cells match no supported board size")]
    BadCellCount(#[error(not(source))] usize),
    /// A cell value exceeds the board's maximum.
    #[display("cell value {value} out of range for a {side}x{side} board")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The board's side length.
        side: u8,
    },
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        for c in s.chars() {
            match c {
                '_' => cells.push(0),
                '0'..='9' => cells.push(c as u8 - b'0'),
                c if c.is_whitespace() => {}
                c => return Err(ParseGridError::InvalidCharacter(c)),
            }
        }
        let size = match cells.len() {
            36 => BoardSize::Six,
            81 => BoardSize::Nine,
            n => return Err(ParseGridError::BadCellCount(n)),
        };
        if let Some(&value) = cells.iter().find(|&&v| v > size.max_value()) {
            return Err(ParseGridError::ValueOutOfRange {
                value,
                side: size.side(),
            });
        }
        Ok(Self { size, cells })
    }
}
