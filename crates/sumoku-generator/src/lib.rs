//! Puzzle generation for Sumoku game modes.
//!
//! This crate turns a mode and difficulty into a ready-to-play puzzle:
//!
//! 1. A complete solution grid is produced by randomized backtracking fill.
//! 2. Killer mode partitions the solution into arithmetic cages
//!    ([`CageBuilder`]): randomized breadth-first region growth, leftover
//!    cleanup, adjacency-aware coloring, and difficulty-tiered operator
//!    drawing with validity fallback.
//! 3. Clues are removed according to the mode: classic verifies after every
//!    removal that the puzzle still has exactly one solution, killer
//!    removes cage-internally duplicated clues first, and memory removes
//!    unconditionally.
//!
//! All randomness flows through a [`PuzzleSeed`]-derived PCG stream, so any
//! generated puzzle can be replayed from its seed.
//!
//! # Examples
//!
//! ```
//! use sumoku_generator::{Difficulty, GameMode, PuzzleGenerator};
//! use sumoku_solver::BacktrackSolver;
//!
//! let generator = PuzzleGenerator::new(GameMode::Classic);
//! let generated = generator.generate(Difficulty::Medium);
//!
//! // Classic puzzles always have exactly one solution
//! assert!(BacktrackSolver::new().has_unique_solution(&generated.puzzle));
//!
//! // The seed replays the identical puzzle
//! let replayed = generator.generate_with_seed(Difficulty::Medium, generated.seed);
//! assert_eq!(replayed.puzzle, generated.puzzle);
//! ```

pub mod cage_builder;
pub mod difficulty;
pub mod generator;
pub mod seed;

pub use self::{
    cage_builder::CageBuilder,
    difficulty::{Difficulty, GameMode, GeneratorConfig},
    generator::{GeneratedPuzzle, PuzzleGenerator, generate_solution},
    seed::{ParseSeedError, PuzzleSeed},
};
