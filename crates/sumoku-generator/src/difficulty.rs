//! Difficulty tiers and the generation parameters they imply.

use std::{
    fmt::{self, Display},
    ops::RangeInclusive,
};

use sumoku_core::BoardSize;

/// The four difficulty tiers shared by every game mode.
///
/// What a tier means depends on the mode: classic and killer tiers control
/// how many clues are removed (and, for killer, which arithmetic operators
/// cages may use), while memory tiers additionally pick the board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// The gentlest tier.
    Easy,
    /// The default tier.
    Medium,
    /// A challenging tier.
    Hard,
    /// The hardest tier.
    Expert,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Returns the next easier tier, or `None` for [`Difficulty::Easy`].
    ///
    /// Killer arithmetic generation retries a cage at the next easier
    /// tier's operator pool when a tier produces an invalid target.
    #[must_use]
    pub const fn easier(self) -> Option<Self> {
        match self {
            Self::Easy => None,
            Self::Medium => Some(Self::Easy),
            Self::Hard => Some(Self::Medium),
            Self::Expert => Some(Self::Hard),
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// The three puzzle variants the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Classic 9×9 Sudoku with a uniqueness guarantee.
    Classic,
    /// Killer Sudoku: classic constraints plus arithmetic cages.
    Killer,
    /// Memory Sudoku: 6×6 or 9×9 with concealed clues, no uniqueness
    /// guarantee.
    Memory,
}

impl Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classic => "classic",
            Self::Killer => "killer",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Generation parameters derived from a mode and difficulty pair.
///
/// One configuration struct replaces per-mode generator subclasses: the
/// generator reads the board size, how many cells to remove, whether to
/// build cages, and whether each removal must preserve solution uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Board size to generate.
    pub size: BoardSize,
    /// How many cells to remove from the solution (a target is drawn
    /// uniformly from this range).
    pub removal_range: RangeInclusive<usize>,
    /// Whether to partition the solution into arithmetic cages.
    pub cages: bool,
    /// Whether every removal must keep the puzzle uniquely solvable.
    pub uniqueness_check: bool,
}

impl GeneratorConfig {
    /// Returns the configuration for a mode and difficulty.
    #[must_use]
    pub fn for_mode(mode: GameMode, difficulty: Difficulty) -> Self {
        match mode {
            GameMode::Classic => Self {
                size: BoardSize::Nine,
                removal_range: classic_removal_range(difficulty),
                cages: false,
                uniqueness_check: true,
            },
            // Killer shares the classic removal budget but skips the
            // uniqueness re-check: the cage arithmetic constrains the
            // board beyond what the grid-only test can see.
            GameMode::Killer => Self {
                size: BoardSize::Nine,
                removal_range: classic_removal_range(difficulty),
                cages: true,
                uniqueness_check: false,
            },
            GameMode::Memory => {
                let (size, clue_range) = memory_board(difficulty);
                let cells = size.cell_count();
                Self {
                    size,
                    removal_range: cells - clue_range.end()..=cells - clue_range.start(),
                    cages: false,
                    uniqueness_check: false,
                }
            }
        }
    }
}

fn classic_removal_range(difficulty: Difficulty) -> RangeInclusive<usize> {
    match difficulty {
        Difficulty::Easy => 36..=41,
        Difficulty::Medium => 46..=51,
        Difficulty::Hard => 51..=56,
        Difficulty::Expert => 56..=61,
    }
}

/// Memory boards grow with difficulty; the range is how many clues remain.
fn memory_board(difficulty: Difficulty) -> (BoardSize, RangeInclusive<usize>) {
    match difficulty {
        Difficulty::Easy => (BoardSize::Six, 10..=15),
        Difficulty::Medium => (BoardSize::Six, 15..=20),
        Difficulty::Hard => (BoardSize::Nine, 25..=35),
        Difficulty::Expert => (BoardSize::Nine, 40..=50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_ranges() {
        let config = GeneratorConfig::for_mode(GameMode::Classic, Difficulty::Easy);
        assert_eq!(config.size, BoardSize::Nine);
        assert_eq!(config.removal_range, 36..=41);
        assert!(config.uniqueness_check);
        assert!(!config.cages);

        let expert = GeneratorConfig::for_mode(GameMode::Classic, Difficulty::Expert);
        assert_eq!(expert.removal_range, 56..=61);
    }

    #[test]
    fn test_killer_skips_uniqueness() {
        let config = GeneratorConfig::for_mode(GameMode::Killer, Difficulty::Medium);
        assert!(config.cages);
        assert!(!config.uniqueness_check);
        assert_eq!(config.removal_range, 46..=51);
    }

    #[test]
    fn test_memory_sizes_follow_difficulty() {
        let easy = GeneratorConfig::for_mode(GameMode::Memory, Difficulty::Easy);
        assert_eq!(easy.size, BoardSize::Six);
        // 36 cells, 10-15 clues
        assert_eq!(easy.removal_range, 21..=26);

        let expert = GeneratorConfig::for_mode(GameMode::Memory, Difficulty::Expert);
        assert_eq!(expert.size, BoardSize::Nine);
        // 81 cells, 40-50 clues
        assert_eq!(expert.removal_range, 31..=41);
    }

    #[test]
    fn test_easier_chain_terminates() {
        let mut tier = Difficulty::Expert;
        let mut steps = 0;
        while let Some(easier) = tier.easier() {
            tier = easier;
            steps += 1;
        }
        assert_eq!(tier, Difficulty::Easy);
        assert_eq!(steps, 3);
    }
}
