//! Alternating path construction for the augmentation step.

use crate::grid::{Grid, Mark, Zero};
use crate::solution::Cost;
use anyhow;
use anyhow::{anyhow as anyhow_error, ensure, Result};
use tracing::trace;

/// Builds the alternating path that starts at the primed zero `start`.
///
/// The path alternates prime, star, prime, ... and ends with the first prime whose column holds
/// no star. `start` must be primed and its row must not contain a star.
pub(crate) fn augmenting_path<C: Cost>(
    grid: &Grid<C>,
    start: Zero,
) -> Result<Vec<Zero>, anyhow::Error> {
    ensure!(
        grid.mark(start.row, start.col) == Mark::Prime,
        "path start ({}, {}) is not primed",
        start.row,
        start.col
    );
    let mut path = vec![start];
    let mut prime = start;

    while let Some(row) = grid.find_star_in_col(prime.col) {
        let star = Zero {
            row,
            col: prime.col,
        };
        path.push(star);

        // every row holding a star on the path was covered after priming one of its zeros
        let col = grid.find_prime_in_row(star.row).ok_or_else(|| {
            anyhow_error!("no primed zero in row {} of a starred zero on the path", star.row)
        })?;
        prime = Zero { row: star.row, col };
        path.push(prime);

        // a path can visit at most one star per row
        ensure!(path.len() <= 2 * grid.size(), "alternating path does not terminate");
    }

    trace!("augmenting path: {:?}", path);
    Ok(path)
}

/// Flips the marks along `path`: primes become stars, stars are removed.
pub(crate) fn flip<C: Cost>(grid: &mut Grid<C>, path: &[Zero]) {
    for zero in path {
        match grid.mark(zero.row, zero.col) {
            Mark::Prime => grid.set_mark(zero.row, zero.col, Mark::Star),
            Mark::Star => grid.set_mark(zero.row, zero.col, Mark::None),
            Mark::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{augmenting_path, flip};
    use crate::grid::{Grid, Mark, Zero};
    use crate::matrix::CostMatrix;
    use test_env_log::test;

    fn zero_grid(size: usize) -> Grid<i64> {
        let matrix = CostMatrix::from_vec(size, size, vec![0; size * size]).unwrap();
        let mut grid = Grid::with_capacity(size);
        grid.reset(&matrix);
        grid
    }

    #[test]
    fn test_single_prime_path() {
        let mut grid = zero_grid(2);
        grid.set_mark(0, 0, Mark::Star);
        grid.set_mark(1, 1, Mark::Prime);
        let path = augmenting_path(&grid, Zero { row: 1, col: 1 }).unwrap();
        assert_eq!(path, vec![Zero { row: 1, col: 1 }]);
    }

    #[test]
    fn test_alternating_path() {
        // stars on the diagonal of the first two rows, primes shifted one column to the left
        let mut grid = zero_grid(3);
        grid.set_mark(0, 0, Mark::Star);
        grid.set_mark(1, 1, Mark::Star);
        grid.set_mark(0, 2, Mark::Prime);
        grid.set_mark(1, 0, Mark::Prime);
        grid.set_mark(2, 1, Mark::Prime);

        let path = augmenting_path(&grid, Zero { row: 2, col: 1 }).unwrap();
        assert_eq!(
            path,
            vec![
                Zero { row: 2, col: 1 },
                Zero { row: 1, col: 1 },
                Zero { row: 1, col: 0 },
                Zero { row: 0, col: 0 },
                Zero { row: 0, col: 2 },
            ]
        );

        flip(&mut grid, &path);
        grid.clear_primes();
        assert_eq!(grid.find_star_in_row(0), Some(2));
        assert_eq!(grid.find_star_in_row(1), Some(0));
        assert_eq!(grid.find_star_in_row(2), Some(1));
        for col in 0..3 {
            assert!(grid.find_star_in_col(col).is_some());
        }
    }

    #[test]
    fn test_missing_prime_is_an_error() {
        let mut grid = zero_grid(2);
        grid.set_mark(0, 0, Mark::Star);
        grid.set_mark(1, 0, Mark::Prime);
        assert!(augmenting_path(&grid, Zero { row: 1, col: 0 }).is_err());
        assert!(augmenting_path(&grid, Zero { row: 0, col: 1 }).is_err());
    }
}
