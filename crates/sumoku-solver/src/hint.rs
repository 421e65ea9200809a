//! Hint placements suggested by the solver.

use sumoku_core::Position;

/// A suggested placement: a cell and the value to reveal there.
///
/// Produced by [`BacktrackSolver::best_hint`], which picks the empty cell
/// with the fewest remaining candidates so the hint mirrors the "naked
/// single" reasoning a human solver would apply next, giving away as little
/// unrelated information as possible.
///
/// [`BacktrackSolver::best_hint`]: crate::BacktrackSolver::best_hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// The cell to fill.
    pub position: Position,
    /// The value to place there.
    pub value: u8,
}

impl Hint {
    /// Creates a hint.
    #[must_use]
    pub const fn new(position: Position, value: u8) -> Self {
        Self { position, value }
    }
}
