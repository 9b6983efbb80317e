//! Working state of a single Hungarian run.
//!
//! The grid is square: its size is the number of columns of the caller's matrix, and rows past
//! the caller's last row hold zero costs.

use crate::matrix::CostMatrix;
use crate::solution::Cost;

/// Mark of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    None,
    Star,
    Prime,
}

/// Coordinates of a marked zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Zero {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Grid<C: Cost> {
    size: usize,
    costs: Vec<C>,
    marks: Vec<Mark>,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
}

impl<C: Cost> Grid<C> {
    pub fn with_capacity(size: usize) -> Self {
        Grid {
            size: 0,
            costs: Vec::with_capacity(size * size),
            marks: Vec::with_capacity(size * size),
            row_covered: Vec::with_capacity(size),
            col_covered: Vec::with_capacity(size),
        }
    }

    /// Copies `matrix` into a fresh square grid of size `max(num_rows, num_cols)`.
    pub fn reset(&mut self, matrix: &CostMatrix<C>) {
        let size = matrix.num_rows().max(matrix.num_cols());
        self.size = size;

        self.costs.clear();
        self.costs.resize(size * size, C::zero());
        for i in 0..matrix.num_rows() {
            let start = i * size;
            self.costs[start..start + matrix.num_cols()].copy_from_slice(matrix.row(i));
        }

        self.marks.clear();
        self.marks.resize(size * size, Mark::None);
        self.row_covered.clear();
        self.row_covered.resize(size, false);
        self.col_covered.clear();
        self.col_covered.resize(size, false);
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cost(&self, row: usize, col: usize) -> C {
        self.costs[row * self.size + col]
    }

    #[inline]
    pub fn cost_mut(&mut self, row: usize, col: usize) -> &mut C {
        &mut self.costs[row * self.size + col]
    }

    #[inline]
    pub fn row_costs_mut(&mut self, row: usize) -> &mut [C] {
        let start = row * self.size;
        &mut self.costs[start..start + self.size]
    }

    #[inline]
    pub fn mark(&self, row: usize, col: usize) -> Mark {
        self.marks[row * self.size + col]
    }

    #[inline]
    pub fn set_mark(&mut self, row: usize, col: usize, mark: Mark) {
        self.marks[row * self.size + col] = mark;
    }

    #[inline]
    pub fn is_row_covered(&self, row: usize) -> bool {
        self.row_covered[row]
    }

    #[inline]
    pub fn is_col_covered(&self, col: usize) -> bool {
        self.col_covered[col]
    }

    #[inline]
    pub fn set_row_covered(&mut self, row: usize, covered: bool) {
        self.row_covered[row] = covered;
    }

    #[inline]
    pub fn set_col_covered(&mut self, col: usize, covered: bool) {
        self.col_covered[col] = covered;
    }

    pub fn num_covered_cols(&self) -> usize {
        self.col_covered.iter().filter(|covered| **covered).count()
    }

    pub fn clear_covers(&mut self) {
        self.row_covered.iter_mut().for_each(|c| *c = false);
        self.col_covered.iter_mut().for_each(|c| *c = false);
    }

    pub fn clear_primes(&mut self) {
        self.marks
            .iter_mut()
            .filter(|mark| **mark == Mark::Prime)
            .for_each(|mark| *mark = Mark::None);
    }

    /// First zero in row-major order whose row and column are both uncovered.
    pub fn find_uncovered_zero(&self) -> Option<Zero> {
        for row in (0..self.size).filter(|&i| !self.row_covered[i]) {
            for col in 0..self.size {
                if !self.col_covered[col] && self.cost(row, col).is_zero() {
                    return Some(Zero { row, col });
                }
            }
        }
        None
    }

    pub fn find_star_in_row(&self, row: usize) -> Option<usize> {
        (0..self.size).find(|&col| self.mark(row, col) == Mark::Star)
    }

    pub fn find_star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.size).find(|&row| self.mark(row, col) == Mark::Star)
    }

    pub fn find_prime_in_row(&self, row: usize) -> Option<usize> {
        (0..self.size).find(|&col| self.mark(row, col) == Mark::Prime)
    }

    /// Smallest cost among cells whose row and column are both uncovered.
    pub fn min_uncovered(&self) -> Option<C> {
        let mut min = None;
        for row in (0..self.size).filter(|&i| !self.row_covered[i]) {
            for col in (0..self.size).filter(|&j| !self.col_covered[j]) {
                let cost = self.cost(row, col);
                min = match min {
                    Some(m) if m <= cost => Some(m),
                    _ => Some(cost),
                };
            }
        }
        min
    }
}
