//! Pure constraint predicates over boards.
//!
//! Everything here is a total query: no function mutates the grid or fails
//! on a well-formed board. Each predicate takes an optional [`CageSet`];
//! passing one adds the killer-mode in-cage uniqueness constraint to the
//! usual row/column/box constraints.

use crate::{CageSet, Grid, Position};

/// Returns `true` if `value` could sit at `pos` without duplicating a value
/// in its row, column, box, or (if `cages` is given) cage.
///
/// The cell at `pos` itself is ignored, so the query works both for empty
/// cells ("can I place this?") and filled cells ("is this placement
/// consistent with its peers?").
#[must_use]
pub fn value_fits(grid: &Grid, pos: Position, value: u8, cages: Option<&CageSet>) -> bool {
    debug_assert!((1..=grid.size().max_value()).contains(&value));
    peers(grid, pos, cages).all(|peer| grid.get(peer) != value)
}

/// Returns every other cell sharing a row, column, box, or cage with `pos`
/// that holds the same value as `pos`.
///
/// The scan covers the entire neighborhood regardless of edit order, since
/// conflicts are symmetric. An empty cell has no conflicts. The result is
/// sorted row-major with duplicates removed (a peer can share both a row
/// and a box with `pos`).
#[must_use]
pub fn conflicts(grid: &Grid, pos: Position, cages: Option<&CageSet>) -> Vec<Position> {
    let value = grid.get(pos);
    if value == 0 {
        return Vec::new();
    }
    let mut found: Vec<Position> = peers(grid, pos, cages)
        .filter(|&peer| grid.get(peer) == value)
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

/// Returns `true` if every filled cell is consistent with its row, column,
/// and box (empty cells are allowed).
#[must_use]
pub fn is_valid(grid: &Grid) -> bool {
    grid.positions().all(|pos| {
        let value = grid.get(pos);
        value == 0 || value_fits(grid, pos, value, None)
    })
}

/// Returns `true` if the board is complete: every cell filled and the
/// row/column/box constraint satisfied everywhere.
///
/// Cage arithmetic never gates completion, matching classic Sudoku
/// semantics even in killer mode; a filled board that satisfies the grid
/// constraints is complete.
#[must_use]
pub fn is_complete(grid: &Grid) -> bool {
    grid.is_full() && is_valid(grid)
}

/// Iterates over the peers of `pos`: all other cells in its row, column,
/// box, and (if given) cage. Cells shared by several houses appear once per
/// house; callers that collect the result dedupe.
fn peers<'a>(
    grid: &'a Grid,
    pos: Position,
    cages: Option<&'a CageSet>,
) -> impl Iterator<Item = Position> + 'a {
    let size = grid.size();
    let row = (0..size.side()).map(move |col| Position::new(pos.row, col));
    let col = (0..size.side()).map(move |r| Position::new(r, pos.col));
    let boxed = size.box_positions(pos);
    let caged = cages
        .into_iter()
        .flat_map(move |set| set.cage_of(pos).cells().iter().copied());
    row.chain(col)
        .chain(boxed)
        .chain(caged)
        .filter(move |&peer| peer != pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Cage, Operator};

    fn filled_six() -> Grid {
        "123 456
         456 123
         231 564
         564 231
         312 645
         645 312"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_value_fits_row_col_box() {
        let mut grid = Grid::empty(BoardSize::Nine);
        grid.set(Position::new(0, 0), 5);

        assert!(!value_fits(&grid, Position::new(0, 7), 5, None));
        assert!(!value_fits(&grid, Position::new(6, 0), 5, None));
        assert!(!value_fits(&grid, Position::new(2, 2), 5, None));
        assert!(value_fits(&grid, Position::new(2, 2), 4, None));
        // Unrelated cell is unaffected
        assert!(value_fits(&grid, Position::new(4, 4), 5, None));
    }

    #[test]
    fn test_value_fits_ignores_own_cell() {
        let grid = filled_six();
        // Every placement in a valid complete grid is consistent
        for pos in grid.positions() {
            assert!(value_fits(&grid, pos, grid.get(pos), None));
        }
    }

    #[test]
    fn test_conflicts_symmetric_row_duplicate() {
        let mut grid = Grid::empty(BoardSize::Nine);
        grid.set(Position::new(3, 1), 8);
        grid.set(Position::new(3, 6), 8);

        // Both ends of the duplicate see each other
        assert_eq!(conflicts(&grid, Position::new(3, 1), None), vec![
            Position::new(3, 6)
        ]);
        assert_eq!(conflicts(&grid, Position::new(3, 6), None), vec![
            Position::new(3, 1)
        ]);
    }

    #[test]
    fn test_conflicts_deduplicates_shared_houses() {
        let mut grid = Grid::empty(BoardSize::Nine);
        // Same row AND same box
        grid.set(Position::new(0, 0), 2);
        grid.set(Position::new(0, 1), 2);

        assert_eq!(conflicts(&grid, Position::new(0, 0), None), vec![
            Position::new(0, 1)
        ]);
    }

    #[test]
    fn test_conflicts_empty_cell_has_none() {
        let grid = Grid::empty(BoardSize::Six);
        assert!(conflicts(&grid, Position::new(0, 0), None).is_empty());
    }

    #[test]
    fn test_conflicts_idempotent() {
        let mut grid = filled_six();
        grid.set(Position::new(0, 0), 4);
        let first = conflicts(&grid, Position::new(0, 0), None);
        let second = conflicts(&grid, Position::new(0, 0), None);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_cage_conflicts() {
        // An L-shaped cage crossing box boundaries
        let mut grid = Grid::empty(BoardSize::Nine);
        grid.set(Position::new(2, 2), 9);
        grid.set(Position::new(4, 2), 9);

        let mut cages = vec![Cage::new(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(4, 2),
            ],
            vec![Operator::Add, Operator::Add],
            1,
            0,
        )];
        // Fill the rest of the board with row fragments so the set partitions
        for pos in BoardSize::Nine.positions() {
            if !cages[0].contains(pos) {
                cages.push(Cage::new(vec![pos], vec![], 1, 0));
            }
        }
        let cages = CageSet::new(BoardSize::Nine, cages).unwrap();

        // (2,2) and (4,2) share a column anyway, but also a cage; with the
        // cage present the result is identical and still deduplicated
        assert_eq!(conflicts(&grid, Position::new(2, 2), Some(&cages)), vec![
            Position::new(4, 2)
        ]);
        // In-cage uniqueness is part of the fit check
        assert!(!value_fits(
            &grid,
            Position::new(3, 2),
            9,
            Some(&cages)
        ));
    }

    #[test]
    fn test_is_complete() {
        let grid = filled_six();
        assert!(is_valid(&grid));
        assert!(is_complete(&grid));

        let mut broken = grid.clone();
        broken.clear(Position::new(5, 5));
        assert!(is_valid(&broken));
        assert!(!is_complete(&broken));

        let mut duplicate = grid;
        duplicate.set(Position::new(0, 0), 3);
        assert!(!is_valid(&duplicate));
        assert!(!is_complete(&duplicate));
    }
}
