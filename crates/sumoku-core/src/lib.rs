//! Core data structures for Sumoku puzzle variants.
//!
//! This crate provides the data model shared by the solving, generation, and
//! game session crates: grids of variable board size, positions, digit sets,
//! killer-mode cages, and the pure constraint predicates that define what a
//! valid board looks like.
//!
//! # Overview
//!
//! The crate is organized around three layers:
//!
//! 1. **Board geometry** - [`BoardSize`] (6×6 with 2×3 boxes, or 9×9 with
//!    3×3 boxes) and [`Position`] (row/column coordinates with row-major
//!    ordering and 4-directional adjacency).
//! 2. **Cell contents** - [`Grid`] (values `0..=N`, where 0 means empty) and
//!    [`DigitSet`] (a bitset of candidate values `1..=N`).
//! 3. **Killer cages** - [`Operator`], [`Cage`], and [`CageSet`], including
//!    the two-pass precedence evaluator used both when generating arithmetic
//!    targets and when checking a player's filled cage.
//!
//! Constraint predicates live in [`check`]: conflict queries, placement
//! validity, and completion checks, each optionally cage-aware.
//!
//! # Examples
//!
//! ```
//! use sumoku_core::{BoardSize, Grid, Position, check};
//!
//! let mut grid = Grid::empty(BoardSize::Nine);
//! grid.set(Position::new(0, 0), 5);
//!
//! // 5 can no longer be placed in the same row, column, or box
//! assert!(!check::value_fits(&grid, Position::new(0, 8), 5, None));
//! assert!(!check::value_fits(&grid, Position::new(8, 0), 5, None));
//! assert!(!check::value_fits(&grid, Position::new(1, 1), 5, None));
//! assert!(check::value_fits(&grid, Position::new(1, 1), 6, None));
//! ```

pub mod board_size;
pub mod cage;
pub mod check;
pub mod digit_set;
pub mod grid;
pub mod position;

pub use self::{
    board_size::BoardSize,
    cage::{Cage, CagePartitionError, CageSet, Operator},
    digit_set::DigitSet,
    grid::{Grid, ParseGridError},
    position::Position,
};
