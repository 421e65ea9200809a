//! Example demonstrating puzzle generation for every game mode.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` for a mode
//! - Generate a random puzzle, or replay one from a seed
//! - Display the puzzle, solution, seed, and (for killer) the cage layout
//! - Sample many puzzles in parallel to find one with a clue count target
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate -- --mode killer --difficulty hard
//! ```
//!
//! Replay a puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate -- --seed <64 hex chars>
//! ```
//!
//! Sample for the fewest clues within a budget:
//!
//! ```sh
//! cargo run --example generate -- --mode classic --difficulty expert --min-clues --max-tries 200
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use sumoku_generator::{Difficulty, GameMode, GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Classic,
    Killer,
    Memory,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::Killer => GameMode::Killer,
            ModeArg::Memory => GameMode::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Game mode to generate for.
    #[arg(long, value_name = "MODE", default_value = "classic")]
    mode: ModeArg,

    /// Difficulty tier.
    #[arg(long, value_name = "TIER", default_value = "medium")]
    difficulty: DifficultyArg,

    /// Replay a specific puzzle instead of drawing a fresh seed.
    #[arg(long, value_name = "HEX")]
    seed: Option<String>,

    /// Sample puzzles and keep the one with the fewest clues.
    #[arg(long)]
    min_clues: bool,

    /// Maximum puzzles to sample with --min-clues.
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    max_tries: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let generator = PuzzleGenerator::new(args.mode.into());
    let difficulty = args.difficulty.into();

    if let Some(seed) = &args.seed {
        let seed: PuzzleSeed = match seed.parse() {
            Ok(seed) => seed,
            Err(err) => {
                eprintln!("invalid seed: {err}");
                process::exit(2);
            }
        };
        print_puzzle(&generator.generate_with_seed(difficulty, seed));
        return;
    }

    if args.min_clues {
        if args.max_tries == 0 {
            eprintln!("--max-tries must be at least 1.");
            process::exit(1);
        }
        let best = (0..args.max_tries)
            .into_par_iter()
            .map(|_| generator.generate(difficulty))
            .min_by_key(GeneratedPuzzle::clue_count);
        if let Some(puzzle) = best {
            println!("Sampled {} puzzles.", args.max_tries);
            println!();
            print_puzzle(&puzzle);
        }
        return;
    }

    print_puzzle(&generator.generate(difficulty));
}

fn print_puzzle(generated: &GeneratedPuzzle) {
    println!("Seed:");
    println!("  {}", generated.seed);
    println!();
    println!(
        "Mode: {} / {} ({} clues)",
        generated.mode,
        generated.difficulty,
        generated.clue_count()
    );
    println!();
    println!("Puzzle:");
    for line in generated.puzzle.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Solution:");
    for line in generated.solution.to_string().lines() {
        println!("  {line}");
    }

    if let Some(cages) = &generated.cages {
        println!();
        println!("Cages:");
        for cage in cages.cages() {
            let cells: Vec<String> = cage.cells().iter().map(ToString::to_string).collect();
            println!("  {} [{}]", cage.formula(), cells.join(" "));
        }
    }
}
