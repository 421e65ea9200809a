//! Puzzle construction for the three game modes.

use log::debug;
use rand::{Rng, RngExt as _, seq::SliceRandom as _};
use sumoku_core::{BoardSize, CageSet, Grid, Position};
use sumoku_solver::BacktrackSolver;

use crate::{CageBuilder, Difficulty, GameMode, GeneratorConfig, PuzzleSeed};

/// Produces a fully solved grid via randomized backtracking fill.
///
/// Every call with a fresh random stream yields a different solution; the
/// stream fully determines the result.
#[must_use]
pub fn generate_solution<R: Rng + ?Sized>(size: BoardSize, rng: &mut R) -> Grid {
    let mut grid = Grid::empty(size);
    let filled = BacktrackSolver::new().fill(&mut grid, rng);
    debug_assert!(filled, "an empty grid always has a completion");
    grid
}

/// One generated puzzle: the clue grid, its solution, and metadata.
///
/// The puzzle grid zeroes the removed cells; every non-zero puzzle cell
/// equals the corresponding solution cell. Killer puzzles additionally
/// carry the cage partition. The seed replays the exact same puzzle through
/// [`PuzzleGenerator::generate_with_seed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The clue grid handed to the player.
    pub puzzle: Grid,
    /// The unique (classic) or reference (killer/memory) solution.
    pub solution: Grid,
    /// The cage partition, for killer puzzles.
    pub cages: Option<CageSet>,
    /// The mode this puzzle was generated for.
    pub mode: GameMode,
    /// The difficulty this puzzle was generated for.
    pub difficulty: Difficulty,
    /// The seed that produced this puzzle.
    pub seed: PuzzleSeed,
}

impl GeneratedPuzzle {
    /// Returns the board size.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.puzzle.size()
    }

    /// Returns the number of clues left in the puzzle.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.puzzle.filled_count()
    }
}

/// Generates puzzles for one game mode.
///
/// The mode and difficulty together fix the [`GeneratorConfig`]: board
/// size, removal budget, whether cages are built, and whether each removal
/// is verified to preserve solution uniqueness. Classic puzzles carry the
/// uniqueness guarantee; killer puzzles skip the re-check (the cage
/// arithmetic constrains the board beyond the grid-only test) and memory
/// puzzles skip it by design, since their challenge is recall rather than
/// logical uniqueness.
///
/// # Examples
///
/// ```
/// use sumoku_generator::{Difficulty, GameMode, PuzzleGenerator};
///
/// let generator = PuzzleGenerator::new(GameMode::Classic);
/// let puzzle = generator.generate(Difficulty::Easy);
///
/// // Easy classic removes 36-41 of 81 cells
/// assert!((40..=45).contains(&puzzle.clue_count()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PuzzleGenerator {
    mode: GameMode,
}

impl PuzzleGenerator {
    /// Creates a generator for `mode`.
    #[must_use]
    pub const fn new(mode: GameMode) -> Self {
        Self { mode }
    }

    /// Returns the mode this generator produces puzzles for.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Generates a puzzle from a fresh random seed.
    #[must_use]
    pub fn generate(&self, difficulty: Difficulty) -> GeneratedPuzzle {
        self.generate_with_seed(difficulty, PuzzleSeed::random())
    }

    /// Generates the puzzle determined by `seed`.
    ///
    /// The same seed, mode, and difficulty always produce the same puzzle.
    #[must_use]
    pub fn generate_with_seed(&self, difficulty: Difficulty, seed: PuzzleSeed) -> GeneratedPuzzle {
        let config = GeneratorConfig::for_mode(self.mode, difficulty);
        let mut rng = seed.rng();

        let solution = generate_solution(config.size, &mut rng);
        let cages = config
            .cages
            .then(|| CageBuilder::new(difficulty).build(&solution, &mut rng));

        let mut puzzle = solution.clone();
        let removal_target = rng.random_range(config.removal_range.clone());
        let removed = if let Some(cages) = &cages {
            remove_with_cage_priority(&mut puzzle, &solution, cages, removal_target, &mut rng)
        } else if config.uniqueness_check {
            remove_preserving_uniqueness(&mut puzzle, removal_target, &mut rng)
        } else {
            remove_unconditionally(&mut puzzle, removal_target, &mut rng)
        };
        debug!(
            "{} {difficulty}: removed {removed}/{removal_target} cells, {} clues left",
            self.mode,
            puzzle.filled_count()
        );

        GeneratedPuzzle {
            puzzle,
            solution,
            cages,
            mode: self.mode,
            difficulty,
            seed,
        }
    }
}

/// Classic removal: zero cells in random order, keeping each removal only
/// if the whole puzzle still has exactly one solution.
fn remove_preserving_uniqueness<R: Rng + ?Sized>(
    puzzle: &mut Grid,
    target: usize,
    rng: &mut R,
) -> usize {
    let solver = BacktrackSolver::new();
    let mut positions: Vec<Position> = puzzle.positions().collect();
    positions.shuffle(rng);

    let mut removed = 0;
    for pos in positions {
        if removed >= target {
            break;
        }
        let backup = puzzle.get(pos);
        puzzle.clear(pos);
        if solver.has_unique_solution(puzzle) {
            removed += 1;
        } else {
            puzzle.set(pos, backup);
        }
    }
    removed
}

/// Killer removal: cells whose value repeats inside their cage go first
/// (a cage cannot visually disambiguate two equal clues), then the rest in
/// random order, with no uniqueness re-verification.
fn remove_with_cage_priority<R: Rng + ?Sized>(
    puzzle: &mut Grid,
    solution: &Grid,
    cages: &CageSet,
    target: usize,
    rng: &mut R,
) -> usize {
    let mut priority: Vec<Position> = Vec::new();
    for cage in cages.cages() {
        let mut counts = [0_u8; 10];
        for &cell in cage.cells() {
            counts[usize::from(solution.get(cell))] += 1;
        }
        for &cell in cage.cells() {
            if counts[usize::from(solution.get(cell))] > 1 {
                priority.push(cell);
            }
        }
    }
    if !priority.is_empty() {
        debug!("{} duplicated-in-cage cells removed first", priority.len());
    }

    let mut normal: Vec<Position> = puzzle
        .positions()
        .filter(|pos| !priority.contains(pos))
        .collect();
    normal.shuffle(rng);

    let mut removed = 0;
    for pos in priority.into_iter().chain(normal) {
        if removed >= target {
            break;
        }
        puzzle.clear(pos);
        removed += 1;
    }
    removed
}

/// Memory removal: plain random removal with no uniqueness check.
fn remove_unconditionally<R: Rng + ?Sized>(puzzle: &mut Grid, target: usize, rng: &mut R) -> usize {
    let mut positions: Vec<Position> = puzzle.positions().collect();
    positions.shuffle(rng);
    for &pos in positions.iter().take(target) {
        puzzle.clear(pos);
    }
    target.min(positions.len())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sumoku_core::check;

    use super::*;

    fn seed(tag: u8) -> PuzzleSeed {
        PuzzleSeed::from_bytes([tag; 32])
    }

    #[test]
    fn test_scenario_a_easy_classic() {
        let generator = PuzzleGenerator::new(GameMode::Classic);
        let puzzle = generator.generate_with_seed(Difficulty::Easy, seed(1));

        assert!((40..=45).contains(&puzzle.clue_count()));
        assert!(check::is_complete(&puzzle.solution));

        // The solver resolves the puzzle to the stored solution
        let solved = BacktrackSolver::new().solve(&puzzle.puzzle).unwrap();
        assert_eq!(solved, puzzle.solution);
    }

    #[test]
    fn test_classic_puzzles_are_unique() {
        let generator = PuzzleGenerator::new(GameMode::Classic);
        let solver = BacktrackSolver::new();
        for (tag, difficulty) in [(2, Difficulty::Medium), (3, Difficulty::Expert)] {
            let puzzle = generator.generate_with_seed(difficulty, seed(tag));
            assert!(solver.has_unique_solution(&puzzle.puzzle));
        }
    }

    #[test]
    fn test_puzzle_cells_match_solution() {
        for mode in [GameMode::Classic, GameMode::Killer, GameMode::Memory] {
            let puzzle = PuzzleGenerator::new(mode).generate_with_seed(Difficulty::Medium, seed(4));
            for pos in puzzle.puzzle.positions() {
                let clue = puzzle.puzzle.get(pos);
                assert!(clue == 0 || clue == puzzle.solution.get(pos));
            }
        }
    }

    #[test]
    fn test_same_seed_replays_same_puzzle() {
        let generator = PuzzleGenerator::new(GameMode::Killer);
        let a = generator.generate_with_seed(Difficulty::Hard, seed(5));
        let b = generator.generate_with_seed(Difficulty::Hard, seed(5));
        assert_eq!(a, b);

        let c = generator.generate_with_seed(Difficulty::Hard, seed(6));
        assert_ne!(a.puzzle, c.puzzle);
    }

    #[test]
    fn test_killer_carries_cages_others_do_not() {
        assert!(
            PuzzleGenerator::new(GameMode::Killer)
                .generate_with_seed(Difficulty::Easy, seed(7))
                .cages
                .is_some()
        );
        assert!(
            PuzzleGenerator::new(GameMode::Classic)
                .generate_with_seed(Difficulty::Easy, seed(7))
                .cages
                .is_none()
        );
        assert!(
            PuzzleGenerator::new(GameMode::Memory)
                .generate_with_seed(Difficulty::Easy, seed(7))
                .cages
                .is_none()
        );
    }

    #[test]
    fn test_killer_removes_duplicated_cage_cells_first() {
        let generated =
            PuzzleGenerator::new(GameMode::Killer).generate_with_seed(Difficulty::Easy, seed(8));
        let cages = generated.cages.as_ref().unwrap();

        // Cells whose value repeats inside their cage are removed before
        // any other cell; with the usual budgets they are all gone
        let mut duplicated: Vec<Position> = Vec::new();
        for cage in cages.cages() {
            let values = cage.values_in(&generated.solution);
            for (i, &cell) in cage.cells().iter().enumerate() {
                if values.iter().filter(|&&v| v == values[i]).count() > 1 {
                    duplicated.push(cell);
                }
            }
        }
        assert!(!duplicated.is_empty(), "seed produces duplicated cage values");

        let removal_target = generated.puzzle.empty_count();
        let surviving = duplicated
            .iter()
            .filter(|&&cell| generated.puzzle.get(cell) != 0)
            .count();
        assert_eq!(surviving, duplicated.len().saturating_sub(removal_target));
    }

    #[test]
    fn test_memory_board_sizes() {
        let generator = PuzzleGenerator::new(GameMode::Memory);

        let easy = generator.generate_with_seed(Difficulty::Easy, seed(9));
        assert_eq!(easy.size(), BoardSize::Six);
        assert!((10..=15).contains(&easy.clue_count()));

        let hard = generator.generate_with_seed(Difficulty::Hard, seed(10));
        assert_eq!(hard.size(), BoardSize::Nine);
        assert!((25..=35).contains(&hard.clue_count()));
    }

    #[test]
    fn test_generate_solution_is_complete() {
        for size in [BoardSize::Six, BoardSize::Nine] {
            let solution = generate_solution(size, &mut seed(11).rng());
            assert!(check::is_complete(&solution));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_solutions_are_valid(bytes in proptest::array::uniform32(any::<u8>())) {
            let seed = PuzzleSeed::from_bytes(bytes);
            for size in [BoardSize::Six, BoardSize::Nine] {
                let solution = generate_solution(size, &mut seed.rng());
                prop_assert!(check::is_complete(&solution));
            }
        }

        #[test]
        fn prop_killer_cages_partition_and_evaluate(bytes in proptest::array::uniform32(any::<u8>())) {
            let seed = PuzzleSeed::from_bytes(bytes);
            let generated = PuzzleGenerator::new(GameMode::Killer)
                .generate_with_seed(Difficulty::Expert, seed);
            let cages = generated.cages.as_ref().unwrap();

            // CageSet construction already proves the partition; re-check
            // the arithmetic against the solution values
            let mut covered = 0;
            for cage in cages.cages() {
                covered += cage.len();
                let values = cage.values_in(&generated.solution);
                prop_assert_eq!(
                    sumoku_core::cage::evaluate_exact(&values, cage.operators()),
                    Some(cage.target())
                );
            }
            prop_assert_eq!(covered, 81);
        }
    }
}
