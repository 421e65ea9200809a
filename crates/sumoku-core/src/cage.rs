//! Killer-mode cages: contiguous cell groups bound by an arithmetic target.

use std::fmt::Write as _;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::{BoardSize, Grid, Position};

/// Background colors assigned to cages, as CSS `rgba` strings.
///
/// The partitioner picks colors greedily so that no two 4-adjacent cages
/// share one; non-adjacent cages may repeat colors. Presentation layers
/// index this palette with [`Cage::color`].
pub const CAGE_COLORS: [&str; 10] = [
    "rgba(255, 182, 193, 0.3)",
    "rgba(173, 216, 230, 0.3)",
    "rgba(144, 238, 144, 0.3)",
    "rgba(255, 218, 185, 0.3)",
    "rgba(221, 160, 221, 0.3)",
    "rgba(255, 255, 224, 0.3)",
    "rgba(176, 224, 230, 0.3)",
    "rgba(255, 192, 203, 0.3)",
    "rgba(216, 191, 216, 0.3)",
    "rgba(255, 228, 196, 0.3)",
];

/// A binary arithmetic operator in a cage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Operator {
    /// Addition.
    #[display("+")]
    Add,
    /// Subtraction.
    #[display("-")]
    Sub,
    /// Multiplication.
    #[display("×")]
    Mul,
    /// Division.
    #[display("÷")]
    Div,
}

/// Evaluates a cage expression with standard operator precedence.
///
/// The evaluation runs in two passes: first every `×` and `÷` pair is
/// collapsed left-to-right, then the remaining `+` and `-` are applied
/// left-to-right. Division is floating-point, so a player's wrong entries
/// produce the fractional result they imply rather than an error.
///
/// # Panics
///
/// Panics if `operators` is not exactly one shorter than `values`.
///
/// # Examples
///
/// ```
/// use sumoku_core::cage::{Operator, evaluate};
///
/// // 3 + 7 × 2 = 17 (multiplication binds tighter)
/// let result = evaluate(&[3, 7, 2], &[Operator::Add, Operator::Mul]);
/// assert!((result - 17.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn evaluate(values: &[u8], operators: &[Operator]) -> f64 {
    assert_eq!(operators.len() + 1, values.len(), "malformed expression");
    let mut nums: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
    let mut ops: Vec<Operator> = operators.to_vec();

    // First pass: collapse multiplication and division left-to-right.
    let mut i = 0;
    while i < ops.len() {
        match ops[i] {
            Operator::Mul => {
                nums[i] *= nums[i + 1];
                nums.remove(i + 1);
                ops.remove(i);
            }
            Operator::Div => {
                nums[i] /= nums[i + 1];
                nums.remove(i + 1);
                ops.remove(i);
            }
            Operator::Add | Operator::Sub => i += 1,
        }
    }

    // Second pass: addition and subtraction left-to-right.
    let mut result = nums[0];
    for (op, &num) in ops.iter().zip(&nums[1..]) {
        match op {
            Operator::Add => result += num,
            Operator::Sub => result -= num,
            Operator::Mul | Operator::Div => unreachable!(),
        }
    }
    result
}

/// Evaluates a cage expression exactly over integers.
///
/// Same two-pass precedence as [`evaluate`], but every division must be
/// exact; the first inexact division yields `None`. Target generation uses
/// this so that no truncated value is ever stored as a cage target.
///
/// # Panics
///
/// Panics if `operators` is not exactly one shorter than `values`.
#[must_use]
pub fn evaluate_exact(values: &[u8], operators: &[Operator]) -> Option<i64> {
    assert_eq!(operators.len() + 1, values.len(), "malformed expression");
    let mut nums: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
    let mut ops: Vec<Operator> = operators.to_vec();

    let mut i = 0;
    while i < ops.len() {
        match ops[i] {
            Operator::Mul => {
                nums[i] *= nums[i + 1];
                nums.remove(i + 1);
                ops.remove(i);
            }
            Operator::Div => {
                let (lhs, rhs) = (nums[i], nums[i + 1]);
                if rhs == 0 || lhs % rhs != 0 {
                    return None;
                }
                nums[i] = lhs / rhs;
                nums.remove(i + 1);
                ops.remove(i);
            }
            Operator::Add | Operator::Sub => i += 1,
        }
    }

    let mut result = nums[0];
    for (op, &num) in ops.iter().zip(&nums[1..]) {
        match op {
            Operator::Add => result += num,
            Operator::Sub => result -= num,
            Operator::Mul | Operator::Div => unreachable!(),
        }
    }
    Some(result)
}

/// A contiguous group of cells bound by an arithmetic target.
///
/// Cells are kept sorted row-major; the first cell carries the target label
/// in a rendered board and the sorted sequence is the operand order of the
/// formula. A cage of `n` cells holds `n - 1` operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cage {
    cells: Vec<Position>,
    operators: Vec<Operator>,
    target: i64,
    color: u8,
}

impl Cage {
    /// Creates a cage, sorting its cells row-major.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty, if the operator count is not one less
    /// than the cell count, or if `color` is outside the palette.
    #[must_use]
    pub fn new(mut cells: Vec<Position>, operators: Vec<Operator>, target: i64, color: u8) -> Self {
        assert!(!cells.is_empty(), "a cage needs at least one cell");
        assert_eq!(
            operators.len() + 1,
            cells.len(),
            "a cage of n cells needs n - 1 operators"
        );
        assert!(
            usize::from(color) < CAGE_COLORS.len(),
            "color out of palette"
        );
        cells.sort_unstable();
        Self {
            cells,
            operators,
            target,
            color,
        }
    }

    /// Returns the cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns the operator sequence interleaving the cells.
    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns the arithmetic target.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Returns the palette index of this cage's color (see [`CAGE_COLORS`]).
    #[must_use]
    pub const fn color(&self) -> u8 {
        self.color
    }

    /// Returns the number of cells in the cage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the cage has no cells (never, for a valid cage).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell that carries the target label (first in sorted
    /// order).
    #[must_use]
    pub fn label_cell(&self) -> Position {
        self.cells[0]
    }

    /// Returns `true` if `pos` belongs to this cage.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.binary_search(&pos).is_ok()
    }

    /// Returns the values this cage's cells hold in `grid`, in cell order.
    #[must_use]
    pub fn values_in(&self, grid: &Grid) -> Vec<u8> {
        self.cells.iter().map(|&pos| grid.get(pos)).collect()
    }

    /// Renders the formula skeleton shown to the player, e.g. `□ + □ × □ = 17`.
    #[must_use]
    pub fn formula(&self) -> String {
        let mut out = String::from("□");
        for op in &self.operators {
            let _ = write!(out, " {op} □");
        }
        let _ = write!(out, " = {}", self.target);
        out
    }
}

/// Error constructing a [`CageSet`] whose cages do not partition the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CagePartitionError {
    /// A cell belongs to more than one cage.
    #[display("cell {_0} belongs to more than one cage")]
    Overlap(#[error(not(source))] Position),
    /// A cell belongs to no cage.
    #[display("cell {_0} belongs to no cage")]
    Gap(#[error(not(source))] Position),
    /// A cage references a cell outside the board.
    #[display("cell {_0} lies outside the board")]
    OutOfBounds(#[error(not(source))] Position),
}

/// The full set of cages for one killer puzzle.
///
/// Owns the cages and a cell→cage index built once at construction, so the
/// pervasive "which cage owns this cell" lookup is a single array read
/// instead of a scan.
///
/// # Invariant
///
/// The cages partition the board exactly: every cell belongs to exactly one
/// cage. [`CageSet::new`] rejects any other arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CageSet {
    size: BoardSize,
    cages: Vec<Cage>,
    cell_to_cage: Vec<u16>,
}

impl CageSet {
    /// Builds a cage set, validating the partition invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CagePartitionError`] if any cell is covered by zero or more
    /// than one cage, or lies outside the board.
    pub fn new(size: BoardSize, cages: Vec<Cage>) -> Result<Self, CagePartitionError> {
        let mut cell_to_cage = vec![u16::MAX; size.cell_count()];
        for (cage_index, cage) in cages.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation)]
            let cage_index = cage_index as u16;
            for &pos in cage.cells() {
                if pos.row >= size.side() || pos.col >= size.side() {
                    return Err(CagePartitionError::OutOfBounds(pos));
                }
                let slot = &mut cell_to_cage[pos.index(size)];
                if *slot != u16::MAX {
                    return Err(CagePartitionError::Overlap(pos));
                }
                *slot = cage_index;
            }
        }
        if let Some(index) = cell_to_cage.iter().position(|&c| c == u16::MAX) {
            return Err(CagePartitionError::Gap(Position::from_index(index, size)));
        }
        Ok(Self {
            size,
            cages,
            cell_to_cage,
        })
    }

    /// Returns the board size the cages cover.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns all cages.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// Returns the index of the cage owning `pos`.
    #[must_use]
    pub fn cage_index_of(&self, pos: Position) -> usize {
        usize::from(self.cell_to_cage[pos.index(self.size)])
    }

    /// Returns the cage owning `pos`.
    #[must_use]
    pub fn cage_of(&self, pos: Position) -> &Cage {
        &self.cages[self.cage_index_of(pos)]
    }

    /// Returns the number of cages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cages.len()
    }

    /// Returns `true` if there are no cages (never, for a valid set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cages.is_empty()
    }
}
