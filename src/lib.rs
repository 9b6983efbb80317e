//! Solver for the rectangular linear assignment problem.
//!
//! Given an m×n cost matrix with m <= n, finds an assignment of every row to a distinct column
//! with minimal total cost, using the Kuhn-Munkres (Hungarian) algorithm.
//!
//! ```
//! let assignment = kuhn_munkres::solve(&[[4, 1, 3], [2, 0, 5], [3, 2, 2]]).unwrap();
//! assert_eq!(assignment, vec![1, 0, 2]);
//! ```
//!
//! Matrices with more rows than columns are rejected with
//! [`AssignmentError::ShapeUnsupported`]; transpose them first (see [`CostMatrix::transpose`]).
//! To maximize instead of minimize, negate the costs.

pub mod error;
mod grid;
pub mod matrix;
mod path;
pub mod solution;
pub mod solver;

pub use crate::error::AssignmentError;
pub use crate::matrix::CostMatrix;
pub use crate::solution::{Assignment, Cost};
pub use crate::solver::HungarianSolver;

use anyhow;
use anyhow::Result;

/// Solves the assignment problem given as a slice of rows.
///
/// Element `i` of the result is the column assigned to row `i`.
pub fn solve<C, R>(rows: &[R]) -> Result<Vec<usize>, anyhow::Error>
where
    C: Cost,
    R: AsRef<[C]>,
{
    let matrix = CostMatrix::from_rows(rows)?;
    let (mut solver, mut solution) = HungarianSolver::new(matrix.num_rows(), matrix.num_cols());
    solver.solve(&matrix, &mut solution)?;
    Ok(solution.row_to_column)
}

#[cfg(test)]
mod tests {
    use super::{solve, AssignmentError};
    use test_env_log::test;

    #[test]
    fn test_solve_rows() {
        assert_eq!(solve(&[[1, 2], [2, 1]]).unwrap(), vec![0, 1]);
        assert_eq!(solve(&[vec![1i64, 5, 5], vec![5, 1, 5]]).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_solve_rejects_tall_matrix() {
        let err = solve(&[[1], [2]]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssignmentError>(),
            Some(&AssignmentError::ShapeUnsupported {
                num_rows: 2,
                num_cols: 1
            })
        );
        assert!(err.to_string().contains("transpose"));
    }

    #[test]
    fn test_solve_rejects_ragged_rows() {
        let rows = vec![vec![1, 2, 3], vec![1, 2]];
        let err = solve(&rows).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssignmentError>(),
            Some(AssignmentError::MalformedMatrix { .. })
        ));
    }
}
