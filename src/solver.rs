use crate::error::AssignmentError;
use crate::grid::{Grid, Mark};
use crate::matrix::CostMatrix;
use crate::path;
use crate::solution::{Assignment, Cost};
use anyhow;
use anyhow::{anyhow as anyhow_error, ensure, Result};
use tracing::{debug, trace};

/// Steps of the Munkres state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// subtract row minima, then column minima
    Reduce,
    /// greedily star independent zeros
    StarZeros,
    /// cover starred columns and test for a complete assignment
    CoverColumns,
    /// prime uncovered zeros until an augmenting path is found
    Augment,
    /// shift the uncovered minimum to create new zeros
    Adjust,
    Done,
}

/// Solver for the linear assignment problem.
///
/// Finds an assignment of M rows to N distinct columns (M <= N) with minimal total cost using
/// the Kuhn-Munkres algorithm. Working buffers are kept between calls to `solve`, but every call
/// starts from a clean state.
#[derive(Debug, Clone)]
pub struct HungarianSolver<C: Cost> {
    num_rows: usize,
    num_cols: usize,
    grid: Grid<C>,

    pub nits: u32,
    pub naugmentations: u32,
    pub nadjustments: u32,
}

impl<C: Cost> HungarianSolver<C> {
    pub fn new(row_capacity: usize, column_capacity: usize) -> (Self, Assignment<C>) {
        (
            Self {
                num_rows: 0,
                num_cols: 0,
                grid: Grid::with_capacity(row_capacity.max(column_capacity)),
                nits: 0,
                naugmentations: 0,
                nadjustments: 0,
            },
            Assignment::new(row_capacity, column_capacity),
        )
    }

    /// Solves the assignment problem for `matrix` and stores the result in `solution`.
    ///
    /// Fails with [`AssignmentError::ShapeUnsupported`] if the matrix has more rows than
    /// columns. Neither the solver nor `solution` is touched in that case.
    pub fn solve(
        &mut self,
        matrix: &CostMatrix<C>,
        solution: &mut Assignment<C>,
    ) -> Result<(), anyhow::Error> {
        ensure!(
            matrix.num_rows() <= matrix.num_cols(),
            AssignmentError::ShapeUnsupported {
                num_rows: matrix.num_rows(),
                num_cols: matrix.num_cols(),
            }
        );
        self.init_solve(matrix);

        let mut step = Step::Reduce;
        while step != Step::Done {
            trace!("step {:?}", step);
            self.nits += 1;
            step = match step {
                Step::Reduce => self.reduce()?,
                Step::StarZeros => self.star_zeros(),
                Step::CoverColumns => self.cover_columns(),
                Step::Augment => self.augment()?,
                Step::Adjust => self.adjust()?,
                Step::Done => Step::Done,
            };
        }

        self.extract(matrix, solution)?;
        debug!(
            "solved {}x{}: cost {}, nits {}, naugmentations {}, nadjustments {}",
            self.num_rows,
            self.num_cols,
            solution.cost,
            self.nits,
            self.naugmentations,
            self.nadjustments
        );
        trace!("row_to_column: {:?}", solution.row_to_column);
        Ok(())
    }

    fn init_solve(&mut self, matrix: &CostMatrix<C>) {
        self.num_rows = matrix.num_rows();
        self.num_cols = matrix.num_cols();
        self.grid.reset(matrix);

        self.nits = 0;
        self.naugmentations = 0;
        self.nadjustments = 0;
    }

    fn reduce(&mut self) -> Result<Step, anyhow::Error> {
        let size = self.grid.size();
        for i in 0..size {
            let row = self.grid.row_costs_mut(i);
            if let Some(min) = row.iter().copied().min() {
                for c in row.iter_mut() {
                    *c = c
                        .checked_sub(&min)
                        .ok_or_else(|| anyhow_error!("row {} reduction overflows", i))?;
                }
            }
        }

        // rows are non-negative now, so subtracting a column minimum cannot overflow
        for j in 0..size {
            if let Some(min) = (0..size).map(|i| self.grid.cost(i, j)).min() {
                (0..size).for_each(|i| *self.grid.cost_mut(i, j) -= min);
            }
        }
        Ok(Step::StarZeros)
    }

    fn star_zeros(&mut self) -> Step {
        let size = self.grid.size();
        for i in 0..size {
            for j in 0..size {
                if self.grid.cost(i, j).is_zero()
                    && !self.grid.is_row_covered(i)
                    && !self.grid.is_col_covered(j)
                {
                    self.grid.set_mark(i, j, Mark::Star);
                    self.grid.set_row_covered(i, true);
                    self.grid.set_col_covered(j, true);
                    break;
                }
            }
        }

        self.grid.clear_covers();
        Step::CoverColumns
    }

    fn cover_columns(&mut self) -> Step {
        let size = self.grid.size();
        for j in 0..size {
            if self.grid.find_star_in_col(j).is_some() {
                self.grid.set_col_covered(j, true);
            }
        }

        let covered = self.grid.num_covered_cols();
        trace!("covered columns: {}/{}", covered, size);
        if covered >= size {
            Step::Done
        } else {
            Step::Augment
        }
    }

    fn augment(&mut self) -> Result<Step, anyhow::Error> {
        while let Some(zero) = self.grid.find_uncovered_zero() {
            self.grid.set_mark(zero.row, zero.col, Mark::Prime);

            if let Some(star_col) = self.grid.find_star_in_row(zero.row) {
                self.grid.set_row_covered(zero.row, true);
                self.grid.set_col_covered(star_col, false);
            } else {
                let path = path::augmenting_path(&self.grid, zero)?;
                path::flip(&mut self.grid, &path);
                self.grid.clear_primes();
                self.grid.clear_covers();
                self.naugmentations += 1;
                return Ok(Step::CoverColumns);
            }
        }
        Ok(Step::Adjust)
    }

    fn adjust(&mut self) -> Result<Step, anyhow::Error> {
        let min = self
            .grid
            .min_uncovered()
            .ok_or_else(|| anyhow_error!("every row or every column is covered"))?;
        trace!("adjusting by {}", min);

        let size = self.grid.size();
        for i in 0..size {
            let row_covered = self.grid.is_row_covered(i);
            for j in 0..size {
                match (row_covered, self.grid.is_col_covered(j)) {
                    // uncovered costs are at least min
                    (false, false) => *self.grid.cost_mut(i, j) -= min,
                    (true, true) => {
                        let cost = self.grid.cost_mut(i, j);
                        *cost = cost.checked_add(&min).ok_or_else(|| {
                            anyhow_error!("adjusting ({}, {}) by {} overflows", i, j, min)
                        })?;
                    }
                    _ => {}
                }
            }
        }

        self.grid.clear_covers();
        self.nadjustments += 1;
        Ok(Step::CoverColumns)
    }

    /// Reads the starred zeros of the caller's rows into `solution`.
    fn extract(
        &self,
        matrix: &CostMatrix<C>,
        solution: &mut Assignment<C>,
    ) -> Result<(), anyhow::Error> {
        solution.row_to_column.clear();
        solution.column_to_row.clear();
        solution.column_to_row.resize(self.num_cols, usize::MAX);

        for i in 0..self.num_rows {
            let j = self
                .grid
                .find_star_in_row(i)
                .ok_or_else(|| anyhow_error!("row {} has no starred zero", i))?;
            solution.row_to_column.push(j);
            solution.column_to_row[j] = i;
        }
        solution.cost = matrix.assignment_cost(&solution.row_to_column)?;
        Ok(())
    }
}
