//! Cage partitioning and arithmetic target generation for killer puzzles.

use std::collections::VecDeque;

use log::trace;
use rand::{Rng, RngExt as _, seq::SliceRandom as _};
use sumoku_core::{
    BoardSize, Cage, CageSet, Grid, Position,
    cage::{self, CAGE_COLORS, Operator},
};

use crate::Difficulty;

/// Smallest region the growth phase will keep.
const MIN_CAGE_SIZE: usize = 5;
/// Largest size the growth phase aims for.
const MAX_CAGE_SIZE: usize = 8;

/// Partitions a completed solution grid into arithmetic cages.
///
/// The partition runs in two phases. Growth seeds a region at each
/// not-yet-assigned cell (row-major) and expands it breadth-first through
/// shuffled 4-directional neighbors toward a random target size in
/// [5, 8]; regions that come up short release their cells. Cleanup then
/// attaches every released cell to an adjacent region when one exists,
/// otherwise to the region owning the city-block-nearest cell, so the
/// cages always partition the board exactly. Cleanup can push a region a
/// little past the growth ceiling; a singleton region is possible only
/// when no region exists at all, which cannot happen on a real board.
///
/// Each cage's cells are ordered row-major (the first cell carries the
/// label and the order fixes the formula's operands), colored greedily so
/// no two adjacent cages share a palette entry, and given an operator
/// sequence whose two-pass evaluation over the solution values is the
/// stored target. The difficulty selects the operator pool; a tier whose
/// draw produces a non-positive, oversized, or fractional target retries
/// with the next easier tier's pool, bottoming out at addition-only,
/// which is always valid.
#[derive(Debug, Clone, Copy)]
pub struct CageBuilder {
    difficulty: Difficulty,
}

impl CageBuilder {
    /// Creates a builder generating targets for `difficulty`.
    #[must_use]
    pub const fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Builds the cage set for a completed solution grid.
    ///
    /// # Panics
    ///
    /// Panics if `solution` contains empty cells.
    #[must_use]
    pub fn build<R: Rng + ?Sized>(&self, solution: &Grid, rng: &mut R) -> CageSet {
        assert!(solution.is_full(), "cages are built over a complete solution");
        let size = solution.size();
        let regions = Self::partition(size, rng);
        let colors = Self::assign_colors(&regions, size);

        let cages = regions
            .into_iter()
            .zip(colors)
            .map(|(region, color)| {
                let values: Vec<u8> = region.iter().map(|&pos| solution.get(pos)).collect();
                let (operators, target) = self.operators_for(&values, rng);
                Cage::new(region, operators, target, color)
            })
            .collect();

        CageSet::new(size, cages).expect("growth and cleanup cover every cell exactly once")
    }

    /// Splits the board into regions (growth + cleanup), each sorted
    /// row-major.
    fn partition<R: Rng + ?Sized>(size: BoardSize, rng: &mut R) -> Vec<Vec<Position>> {
        let mut assigned = vec![false; size.cell_count()];
        let mut regions: Vec<Vec<Position>> = Vec::new();

        for seed in size.positions() {
            if assigned[seed.index(size)] {
                continue;
            }
            let target = rng.random_range(MIN_CAGE_SIZE..=MAX_CAGE_SIZE);
            let region = Self::grow_region(seed, target, size, &mut assigned, rng);
            if region.len() >= MIN_CAGE_SIZE {
                regions.push(region);
            } else {
                trace!("releasing {}-cell region seeded at {seed}", region.len());
                for &cell in &region {
                    assigned[cell.index(size)] = false;
                }
            }
        }

        let mut region_of: Vec<Option<usize>> = vec![None; size.cell_count()];
        for (i, region) in regions.iter().enumerate() {
            for &cell in region {
                region_of[cell.index(size)] = Some(i);
            }
        }
        for pos in size.positions() {
            if region_of[pos.index(size)].is_some() {
                continue;
            }
            let attach = pos
                .neighbors(size)
                .find_map(|neighbor| region_of[neighbor.index(size)])
                .or_else(|| Self::nearest_region(&regions, pos));
            if let Some(i) = attach {
                regions[i].push(pos);
                region_of[pos.index(size)] = Some(i);
            } else {
                // Only reachable when growth produced no region at all.
                region_of[pos.index(size)] = Some(regions.len());
                regions.push(vec![pos]);
            }
        }

        for region in &mut regions {
            region.sort_unstable();
        }
        regions
    }

    /// Grows one region breadth-first from `seed` toward `target` cells.
    fn grow_region<R: Rng + ?Sized>(
        seed: Position,
        target: usize,
        size: BoardSize,
        assigned: &mut [bool],
        rng: &mut R,
    ) -> Vec<Position> {
        let mut region = vec![seed];
        assigned[seed.index(size)] = true;
        let mut frontier = VecDeque::from([seed]);

        while region.len() < target {
            let Some(cell) = frontier.pop_front() else {
                break;
            };
            let mut neighbors: Vec<Position> = cell
                .neighbors(size)
                .filter(|neighbor| !assigned[neighbor.index(size)])
                .collect();
            neighbors.shuffle(rng);
            for neighbor in neighbors {
                if region.len() >= target {
                    break;
                }
                assigned[neighbor.index(size)] = true;
                region.push(neighbor);
                frontier.push_back(neighbor);
            }
        }
        region
    }

    /// Returns the region owning the cell closest to `pos` by city-block
    /// distance (first found wins ties).
    fn nearest_region(regions: &[Vec<Position>], pos: Position) -> Option<usize> {
        let mut best: Option<(u8, usize)> = None;
        for (i, region) in regions.iter().enumerate() {
            for &cell in region {
                let distance = cell.city_block_distance(pos);
                if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                    best = Some((distance, i));
                }
            }
        }
        best.map(|(_, i)| i)
    }

    /// Greedily colors regions so no two 4-adjacent regions share a color.
    fn assign_colors(regions: &[Vec<Position>], size: BoardSize) -> Vec<u8> {
        let mut region_of = vec![usize::MAX; size.cell_count()];
        for (i, region) in regions.iter().enumerate() {
            for &cell in region {
                region_of[cell.index(size)] = i;
            }
        }

        let mut colors: Vec<Option<u8>> = vec![None; regions.len()];
        for (i, region) in regions.iter().enumerate() {
            let mut taken = [false; CAGE_COLORS.len()];
            for &cell in region {
                for neighbor in cell.neighbors(size) {
                    let j = region_of[neighbor.index(size)];
                    if j != i {
                        if let Some(color) = colors[j] {
                            taken[usize::from(color)] = true;
                        }
                    }
                }
            }
            let choice = (0..CAGE_COLORS.len()).find(|&c| !taken[c]).unwrap_or(0);
            colors[i] = Some(u8::try_from(choice).unwrap_or(0));
        }
        colors.into_iter().map(Option::unwrap_or_default).collect()
    }

    /// Draws an operator sequence for the sorted cage values and returns it
    /// with its evaluated target, falling back tier by tier until valid.
    fn operators_for<R: Rng + ?Sized>(&self, values: &[u8], rng: &mut R) -> (Vec<Operator>, i64) {
        let mut tier = self.difficulty;
        loop {
            if let Some(result) = Self::try_tier(tier, values, rng) {
                return result;
            }
            match tier.easier() {
                Some(easier) => tier = easier,
                None => unreachable!("addition-only targets are always valid"),
            }
        }
    }

    /// One attempt at a tier; `None` means the draw violated the tier's
    /// target bounds and the caller should retry easier.
    fn try_tier<R: Rng + ?Sized>(
        tier: Difficulty,
        values: &[u8],
        rng: &mut R,
    ) -> Option<(Vec<Operator>, i64)> {
        let operators = match tier {
            Difficulty::Easy => vec![Operator::Add; values.len() - 1],
            Difficulty::Medium => (1..values.len())
                .map(|_| {
                    if rng.random_bool(0.5) {
                        Operator::Add
                    } else {
                        Operator::Sub
                    }
                })
                .collect(),
            Difficulty::Hard => (1..values.len())
                .map(|_| match rng.random_range(0.0..1.0) {
                    r if r < 0.4 => Operator::Add,
                    r if r < 0.7 => Operator::Sub,
                    _ => Operator::Mul,
                })
                .collect(),
            Difficulty::Expert => Self::expert_operators(values, rng),
        };

        let target = cage::evaluate_exact(values, &operators)?;
        let valid = match tier {
            Difficulty::Easy => true,
            Difficulty::Medium => target > 0,
            Difficulty::Hard | Difficulty::Expert => target > 0 && target <= 1000,
        };
        valid.then_some((operators, target))
    }

    /// Expert draws from all four operators. Division is only picked when
    /// the running left-to-right value divides evenly at that step;
    /// otherwise the step degrades to addition.
    fn expert_operators<R: Rng + ?Sized>(values: &[u8], rng: &mut R) -> Vec<Operator> {
        let mut running = i64::from(values[0]);
        let mut operators = Vec::with_capacity(values.len() - 1);
        for &value in &values[1..] {
            let value = i64::from(value);
            let op = match rng.random_range(0.0..1.0) {
                r if r < 0.3 => Operator::Add,
                r if r < 0.5 => Operator::Sub,
                r if r < 0.75 => Operator::Mul,
                _ if running % value == 0 => Operator::Div,
                _ => Operator::Add,
            };
            running = match op {
                Operator::Add => running + value,
                Operator::Sub => running - value,
                Operator::Mul => running * value,
                Operator::Div => running / value,
            };
            operators.push(op);
        }
        operators
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;
    use sumoku_solver::BacktrackSolver;

    use super::*;

    fn rng(tag: u8) -> Pcg64 {
        Pcg64::from_seed([tag; 32])
    }

    fn solution(tag: u8) -> Grid {
        let mut grid = Grid::empty(BoardSize::Nine);
        assert!(BacktrackSolver::new().fill(&mut grid, &mut rng(tag)));
        grid
    }

    #[test]
    fn test_partition_covers_board() {
        let regions = CageBuilder::partition(BoardSize::Nine, &mut rng(1));
        let total: usize = regions.iter().map(Vec::len).sum();
        assert_eq!(total, 81);

        let mut seen = vec![false; 81];
        for region in &regions {
            for &cell in region {
                assert!(!seen[cell.index(BoardSize::Nine)], "cell in two regions");
                seen[cell.index(BoardSize::Nine)] = true;
            }
        }
    }

    #[test]
    fn test_partition_region_sizes() {
        for tag in 0..20 {
            let regions = CageBuilder::partition(BoardSize::Nine, &mut rng(tag));
            for region in &regions {
                // Growth keeps regions of 5-8; cleanup may attach leftover
                // cells on top of that but never creates a singleton while
                // other regions exist
                assert!(region.len() >= MIN_CAGE_SIZE, "region of {}", region.len());
                assert!(region.len() <= 2 * MAX_CAGE_SIZE, "region of {}", region.len());
            }
        }
    }

    #[test]
    fn test_regions_are_sorted_row_major() {
        let regions = CageBuilder::partition(BoardSize::Nine, &mut rng(7));
        for region in &regions {
            let mut sorted = region.clone();
            sorted.sort_unstable();
            assert_eq!(&sorted, region);
        }
    }

    #[test]
    fn test_adjacent_cages_have_distinct_colors() {
        let builder = CageBuilder::new(Difficulty::Easy);
        let cages = builder.build(&solution(3), &mut rng(4));
        for pos in BoardSize::Nine.positions() {
            let own = cages.cage_index_of(pos);
            for neighbor in pos.neighbors(BoardSize::Nine) {
                let other = cages.cage_index_of(neighbor);
                if own != other {
                    assert_ne!(
                        cages.cages()[own].color(),
                        cages.cages()[other].color(),
                        "adjacent cages share a color"
                    );
                }
            }
        }
    }

    #[test]
    fn test_targets_match_solution_values() {
        for difficulty in Difficulty::ALL {
            let builder = CageBuilder::new(difficulty);
            let solution = solution(5);
            let cages = builder.build(&solution, &mut rng(6));
            for cage in cages.cages() {
                let values = cage.values_in(&solution);
                assert_eq!(
                    cage::evaluate_exact(&values, cage.operators()),
                    Some(cage.target()),
                    "stored target must equal the exact evaluation"
                );
                assert!(cage.target() > 0);
            }
        }
    }

    #[test]
    fn test_easy_cages_are_addition_only() {
        let builder = CageBuilder::new(Difficulty::Easy);
        let solution = solution(8);
        let cages = builder.build(&solution, &mut rng(9));
        for cage in cages.cages() {
            assert!(cage.operators().iter().all(|&op| op == Operator::Add));
            let sum: i64 = cage.values_in(&solution).iter().map(|&v| i64::from(v)).sum();
            assert_eq!(cage.target(), sum);
        }
    }

    #[test]
    fn test_medium_targets_positive() {
        let builder = CageBuilder::new(Difficulty::Medium);
        let cages = builder.build(&solution(10), &mut rng(11));
        for cage in cages.cages() {
            assert!(cage.target() > 0);
            assert!(
                cage.operators()
                    .iter()
                    .all(|op| matches!(op, Operator::Add | Operator::Sub))
            );
        }
    }

    #[test]
    fn test_hard_and_expert_targets_bounded() {
        for difficulty in [Difficulty::Hard, Difficulty::Expert] {
            let builder = CageBuilder::new(difficulty);
            let cages = builder.build(&solution(12), &mut rng(13));
            for cage in cages.cages() {
                assert!(cage.target() > 0 && cage.target() <= 1000);
            }
        }
    }

    #[test]
    fn test_expert_divisions_are_exact() {
        // evaluate_exact returning the stored target already proves every
        // division in every kept operator sequence is exact; run a few
        // streams to exercise the division path
        for tag in 0..5 {
            let builder = CageBuilder::new(Difficulty::Expert);
            let solution = solution(tag);
            let cages = builder.build(&solution, &mut rng(tag.wrapping_add(100)));
            for cage in cages.cages() {
                let values = cage.values_in(&solution);
                assert_eq!(
                    cage::evaluate_exact(&values, cage.operators()),
                    Some(cage.target())
                );
            }
        }
    }

    #[test]
    fn test_singleton_only_without_other_regions() {
        for tag in 0..20 {
            let regions = CageBuilder::partition(BoardSize::Nine, &mut rng(tag));
            // The first grown region always reaches 5 cells on a real
            // board, so the last-resort singleton branch never fires
            assert!(regions.iter().all(|region| region.len() > 1));
        }
    }

    #[test]
    fn test_scenario_b_formula() {
        // 3 + 7 × 2: multiplication first (7 × 2 = 14), then 3 + 14 = 17
        let values = [3, 7, 2];
        let operators = [Operator::Add, Operator::Mul];
        assert_eq!(cage::evaluate_exact(&values, &operators), Some(17));
    }
}
