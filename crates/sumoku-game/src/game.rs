//! A game session over one generated puzzle.

use sumoku_core::{BoardSize, CageSet, DigitSet, Grid, Position, cage, check};
use sumoku_generator::{Difficulty, GameMode, GeneratedPuzzle};
use sumoku_solver::{BacktrackSolver, Hint};

use crate::{CellState, FLIP_BUDGET, GameError, HINT_BUDGET};

/// Tolerance when comparing a cage's computed value against its target;
/// wrong entries can make division produce fractions.
const CAGE_TOLERANCE: f64 = 1e-4;

/// The result of checking one cage's arithmetic against the player's board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CageCheck {
    /// Whether the cage is (vacuously or actually) satisfied.
    pub valid: bool,
    /// The evaluated value, once every cell in the cage is filled.
    pub computed: Option<f64>,
    /// The cage's stored target.
    pub target: i64,
}

/// A Sudoku game session.
///
/// Owns the puzzle, solution, cages, and the player's board, and mediates
/// every edit: given cells are immutable, values are range-checked, and
/// completion is detected after each placement. One session covers one
/// puzzle; start a new game by constructing a new `Game`.
///
/// # Example
///
/// ```
/// use sumoku_game::Game;
/// use sumoku_generator::{Difficulty, GameMode, PuzzleGenerator};
///
/// let generator = PuzzleGenerator::new(GameMode::Classic);
/// let mut game = Game::new(generator.generate(Difficulty::Easy));
///
/// // Fill every empty cell from the solution
/// let solution = game.solution().clone();
/// for pos in solution.positions() {
///     if game.cell(pos).is_empty() {
///         game.set_digit(pos, solution.get(pos)).unwrap();
///     }
/// }
/// assert!(game.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    mode: GameMode,
    difficulty: Difficulty,
    puzzle: Grid,
    solution: Grid,
    cages: Option<CageSet>,
    board: Grid,
    hints_left: u8,
    hints_used: u8,
    // Memory mode only: which cells are concealed after the recall phase.
    hidden: Vec<bool>,
    flips_left: u8,
    memory_phase: bool,
}

impl Game {
    /// Creates a session from a generated puzzle.
    ///
    /// The player's board starts as a copy of the clue grid. Memory games
    /// begin in the recall phase with every given visible; call
    /// [`end_memory_phase`](Self::end_memory_phase) when the recall timer
    /// expires.
    #[must_use]
    pub fn new(generated: GeneratedPuzzle) -> Self {
        let GeneratedPuzzle {
            puzzle,
            solution,
            cages,
            mode,
            difficulty,
            seed: _,
        } = generated;
        let hidden = if mode == GameMode::Memory {
            puzzle.cells().iter().map(|&v| v != 0).collect()
        } else {
            Vec::new()
        };
        Self {
            mode,
            difficulty,
            board: puzzle.clone(),
            puzzle,
            solution,
            cages,
            hints_left: HINT_BUDGET,
            hints_used: 0,
            hidden,
            flips_left: FLIP_BUDGET,
            memory_phase: mode == GameMode::Memory,
        }
    }

    /// Returns the game mode.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the difficulty the puzzle was generated for.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the board size.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.board.size()
    }

    /// Returns the player's current board (givens included).
    #[must_use]
    pub const fn board(&self) -> &Grid {
        &self.board
    }

    /// Returns the solution grid.
    #[must_use]
    pub const fn solution(&self) -> &Grid {
        &self.solution
    }

    /// Returns the cage set, for killer games.
    #[must_use]
    pub const fn cages(&self) -> Option<&CageSet> {
        self.cages.as_ref()
    }

    /// Returns the state of the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> CellState {
        let given = self.puzzle.get(pos);
        if given != 0 {
            return CellState::Given(given);
        }
        match self.board.get(pos) {
            0 => CellState::Empty,
            value => CellState::Filled(value),
        }
    }

    /// Returns `true` if the cell at `pos` is a given clue.
    #[must_use]
    pub fn is_given(&self, pos: Position) -> bool {
        !self.puzzle.is_empty_at(pos)
    }

    /// Places `value` at `pos`.
    ///
    /// Completing the board reveals any concealed cells, so a finished
    /// memory game shows everything for final review.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGiven`] for given cells and
    /// [`GameError::InvalidValue`] for values outside `1..=N`.
    pub fn set_digit(&mut self, pos: Position, value: u8) -> Result<(), GameError> {
        if self.is_given(pos) {
            return Err(GameError::CannotModifyGiven(pos));
        }
        if value == 0 || value > self.size().max_value() {
            return Err(GameError::InvalidValue(value));
        }
        self.board.set(pos, value);
        if check::is_complete(&self.board) {
            self.hidden.fill(false);
        }
        Ok(())
    }

    /// Empties the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGiven`] for given cells.
    pub fn clear(&mut self, pos: Position) -> Result<(), GameError> {
        if self.is_given(pos) {
            return Err(GameError::CannotModifyGiven(pos));
        }
        self.board.clear(pos);
        Ok(())
    }

    /// Returns every cell conflicting with the value at `pos`: same row,
    /// column, box, or (killer) cage, holding the identical value.
    ///
    /// The scan covers the whole neighborhood regardless of which cell was
    /// edited last, so both ends of a duplicate report each other.
    #[must_use]
    pub fn conflicts(&self, pos: Position) -> Vec<Position> {
        check::conflicts(&self.board, pos, self.cages.as_ref())
    }

    /// Returns the candidate values for the empty cell at `pos`.
    #[must_use]
    pub fn possible_values(&self, pos: Position) -> DigitSet {
        self.solver().possible_values(&self.board, pos)
    }

    /// Returns `true` when every cell is filled and the row/column/box
    /// constraint holds everywhere.
    ///
    /// Cage arithmetic and memory concealment never gate completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        check::is_complete(&self.board)
    }

    /// Applies the best available hint to the board and returns it.
    ///
    /// The hint targets the empty cell with the fewest candidates and
    /// fills the solution's value there. Each success consumes one hint
    /// from the budget.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoHintsLeft`] when the budget is spent, or
    /// [`GameError::NoHintAvailable`] when no empty cell has candidates.
    pub fn hint(&mut self) -> Result<Hint, GameError> {
        if self.hints_left == 0 {
            return Err(GameError::NoHintsLeft);
        }
        let hint = self
            .solver()
            .best_hint(&self.board, &self.solution)
            .ok_or(GameError::NoHintAvailable)?;
        self.set_digit(hint.position, hint.value)?;
        self.hints_left -= 1;
        self.hints_used += 1;
        Ok(hint)
    }

    /// Returns how many hints remain.
    #[must_use]
    pub const fn hints_left(&self) -> u8 {
        self.hints_left
    }

    /// Returns how many hints were consumed this session.
    #[must_use]
    pub const fn hints_used(&self) -> u8 {
        self.hints_used
    }

    /// Adds `count` hints to the budget (an external reward flow decides
    /// when).
    pub fn grant_extra_hints(&mut self, count: u8) {
        self.hints_left = self.hints_left.saturating_add(count);
    }

    /// Checks the cage containing `pos` against the player's entries.
    ///
    /// A cage with empty cells is vacuously valid and reports no computed
    /// value. A filled cage is evaluated with the two-pass precedence
    /// evaluator and compared against the target within a small tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotKiller`] if the game has no cages.
    pub fn validate_cage_formula(&self, pos: Position) -> Result<CageCheck, GameError> {
        let cages = self.cages.as_ref().ok_or(GameError::NotKiller)?;
        let cage = cages.cage_of(pos);
        let values = cage.values_in(&self.board);
        if values.contains(&0) {
            return Ok(CageCheck {
                valid: true,
                computed: None,
                target: cage.target(),
            });
        }
        let computed = cage::evaluate(&values, cage.operators());
        #[expect(clippy::cast_precision_loss)]
        let valid = (computed - cage.target() as f64).abs() < CAGE_TOLERANCE;
        Ok(CageCheck {
            valid,
            computed: Some(computed),
            target: cage.target(),
        })
    }

    /// Returns `true` while a memory game is in its recall phase (givens
    /// visible for memorizing).
    #[must_use]
    pub const fn in_memory_phase(&self) -> bool {
        self.memory_phase
    }

    /// Ends the recall phase; givens become concealed.
    ///
    /// The caller owns the recall timer, so this is driven externally.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotMemory`] for classic and killer games.
    pub fn end_memory_phase(&mut self) -> Result<(), GameError> {
        if self.mode != GameMode::Memory {
            return Err(GameError::NotMemory);
        }
        self.memory_phase = false;
        Ok(())
    }

    /// Returns `true` if the cell at `pos` is currently concealed.
    ///
    /// Cells are only concealed in memory games after the recall phase.
    #[must_use]
    pub fn is_cell_hidden(&self, pos: Position) -> bool {
        !self.memory_phase
            && self
                .hidden
                .get(pos.index(self.size()))
                .copied()
                .unwrap_or(false)
    }

    /// Spends one flip to reveal the concealed given at `pos`, returning
    /// its value. The reveal is momentary: the concealment mask is
    /// unchanged, and the caller decides how long to show the value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotMemory`] outside memory games,
    /// [`GameError::NoFlipsLeft`] when the budget is spent, or
    /// [`GameError::NotConcealed`] if `pos` holds no concealed given.
    pub fn flip(&mut self, pos: Position) -> Result<u8, GameError> {
        if self.mode != GameMode::Memory {
            return Err(GameError::NotMemory);
        }
        if self.flips_left == 0 {
            return Err(GameError::NoFlipsLeft);
        }
        if !self.is_cell_hidden(pos) {
            return Err(GameError::NotConcealed(pos));
        }
        self.flips_left -= 1;
        Ok(self.board.get(pos))
    }

    /// Returns how many flips remain.
    #[must_use]
    pub const fn flips_left(&self) -> u8 {
        self.flips_left
    }

    /// Restarts the same puzzle: the board returns to the givens and the
    /// hint/flip budgets and recall phase reset.
    pub fn restart(&mut self) {
        self.board = self.puzzle.clone();
        self.hints_left = HINT_BUDGET;
        self.hints_used = 0;
        self.flips_left = FLIP_BUDGET;
        if self.mode == GameMode::Memory {
            self.memory_phase = true;
            self.hidden = self.puzzle.cells().iter().map(|&v| v != 0).collect();
        }
    }

    fn solver(&self) -> BacktrackSolver<'_> {
        match &self.cages {
            Some(cages) => BacktrackSolver::with_cages(cages),
            None => BacktrackSolver::new(),
        }
    }
}
