//! Depth-first backtracking search.

use rand::{Rng, seq::SliceRandom as _};
use sumoku_core::{CageSet, DigitSet, Grid, Position, check};
use tinyvec::ArrayVec;

use crate::Hint;

/// An exhaustive backtracking solver over a board's empty cells.
///
/// The search always scans cells in row-major order and branches on the
/// first empty cell. Candidate order is what distinguishes the entry
/// points: [`fill`](Self::fill) shuffles candidates so generated solutions
/// vary between runs, while [`solve`](Self::solve) and
/// [`count_solutions`](Self::count_solutions) try them in ascending order
/// and are fully deterministic.
///
/// A solver built with [`with_cages`](Self::with_cages) additionally
/// enforces in-cage uniqueness at every placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackSolver<'a> {
    cages: Option<&'a CageSet>,
}

impl<'a> BacktrackSolver<'a> {
    /// Creates a solver enforcing the row/column/box constraints.
    #[must_use]
    pub const fn new() -> Self {
        Self { cages: None }
    }

    /// Creates a solver that additionally enforces in-cage uniqueness.
    #[must_use]
    pub const fn with_cages(cages: &'a CageSet) -> Self {
        Self { cages: Some(cages) }
    }

    /// Completes `grid` in place with a valid random assignment.
    ///
    /// Candidates are tried in a freshly shuffled order at every cell, so
    /// repeated fills of an empty grid yield different solutions. Returns
    /// `false` (leaving the grid with its original filled cells) if no
    /// completion exists.
    pub fn fill<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> bool {
        let Some(pos) = grid.first_empty() else {
            return true;
        };
        let mut candidates: ArrayVec<[u8; 9]> = grid.size().values().collect();
        candidates.shuffle(rng);
        for &value in &candidates {
            if check::value_fits(grid, pos, value, self.cages) {
                grid.set(pos, value);
                if self.fill(grid, rng) {
                    return true;
                }
                grid.clear(pos);
            }
        }
        false
    }

    /// Returns the first full valid assignment for `grid`, or `None` if the
    /// grid is unsatisfiable.
    ///
    /// Generated puzzles are always satisfiable; `None` marks an
    /// exceptional input (an arbitrary or corrupted board).
    #[must_use]
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut work = grid.clone();
        self.solve_rec(&mut work).then_some(work)
    }

    fn solve_rec(&self, grid: &mut Grid) -> bool {
        let Some(pos) = grid.first_empty() else {
            return true;
        };
        for value in grid.size().values() {
            if check::value_fits(grid, pos, value, self.cages) {
                grid.set(pos, value);
                if self.solve_rec(grid) {
                    return true;
                }
                grid.clear(pos);
            }
        }
        false
    }

    /// Counts the solutions of `grid`, stopping as soon as `limit` is
    /// reached.
    ///
    /// The cutoff keeps the uniqueness test cheap: distinguishing "exactly
    /// one" from "more than one" never needs a count beyond 2.
    #[must_use]
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut work = grid.clone();
        let mut count = 0;
        self.count_rec(&mut work, limit, &mut count);
        count
    }

    fn count_rec(&self, grid: &mut Grid, limit: usize, count: &mut usize) {
        if *count >= limit {
            return;
        }
        let Some(pos) = grid.first_empty() else {
            *count += 1;
            return;
        };
        for value in grid.size().values() {
            if check::value_fits(grid, pos, value, self.cages) {
                grid.set(pos, value);
                self.count_rec(grid, limit, count);
                grid.clear(pos);
                if *count >= limit {
                    return;
                }
            }
        }
    }

    /// Returns `true` if `grid` has exactly one solution.
    #[must_use]
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }

    /// Returns the candidate values for the empty cell at `pos`: every
    /// value not already present in its row, column, box, or cage.
    ///
    /// A filled cell has no candidates.
    #[must_use]
    pub fn possible_values(&self, grid: &Grid, pos: Position) -> DigitSet {
        if !grid.is_empty_at(pos) {
            return DigitSet::EMPTY;
        }
        grid.size()
            .values()
            .filter(|&value| check::value_fits(grid, pos, value, self.cages))
            .collect()
    }

    /// Picks the best cell to reveal as a hint: the empty cell with the
    /// fewest candidates, ties broken by row-major scan order.
    ///
    /// The hint value prefers the candidate matching `solution`; when the
    /// true value is not among the candidates (which indicates the board
    /// already contradicts the solution somewhere), the smallest candidate
    /// is returned instead. Cells with no candidates are skipped entirely.
    #[must_use]
    pub fn best_hint(&self, grid: &Grid, solution: &Grid) -> Option<Hint> {
        debug_assert_eq!(grid.size(), solution.size());
        let mut best: Option<(usize, Hint)> = None;
        for pos in grid.positions() {
            if !grid.is_empty_at(pos) {
                continue;
            }
            let candidates = self.possible_values(grid, pos);
            if candidates.is_empty() {
                continue;
            }
            if best.is_none_or(|(len, _)| candidates.len() < len) {
                let answer = solution.get(pos);
                let value = if candidates.contains(answer) {
                    answer
                } else {
                    candidates.smallest().unwrap_or(answer)
                };
                best = Some((candidates.len(), Hint::new(pos, value)));
            }
        }
        best.map(|(_, hint)| hint)
    }
}
