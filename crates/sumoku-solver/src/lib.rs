//! Backtracking search over Sumoku boards.
//!
//! This crate implements the exhaustive depth-first solver shared by every
//! game mode: filling an empty board with a random valid solution, solving
//! a puzzle deterministically, proving solution uniqueness by counting with
//! an early cutoff, and the candidate-set queries that drive hints.
//!
//! The solver is parameterized by an optional [`CageSet`]: with one, the
//! killer-mode in-cage uniqueness constraint joins the usual row/column/box
//! constraints in every decision.
//!
//! [`CageSet`]: sumoku_core::CageSet
//!
//! # Examples
//!
//! ```
//! use sumoku_core::Grid;
//! use sumoku_solver::BacktrackSolver;
//!
//! let puzzle: Grid = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()
//! .unwrap();
//!
//! let solver = BacktrackSolver::new();
//! assert!(solver.has_unique_solution(&puzzle));
//!
//! let solution = solver.solve(&puzzle).expect("puzzle is satisfiable");
//! assert!(solution.is_full());
//! ```

pub mod backtrack;
pub mod hint;

pub use self::{
    backtrack::BacktrackSolver,
    hint::Hint,
};
