//! Caller-facing cost matrix.

use crate::error::AssignmentError;
use crate::solution::Cost;
use anyhow;
use anyhow::{anyhow as anyhow_error, ensure, Result};
use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

/// Rectangular matrix of costs, stored row by row.
///
/// Entry `(i, j)` is the cost of assigning row `i` to column `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix<C: Cost> {
    num_rows: usize,
    num_cols: usize,
    // memory view of all values
    values: Vec<C>,
}

impl<C: Cost> CostMatrix<C> {
    /// Builds a matrix from a slice of rows.
    ///
    /// Fails with [`AssignmentError::MalformedMatrix`] if there are no rows, a row is empty or
    /// the rows differ in length.
    pub fn from_rows<R: AsRef<[C]>>(rows: &[R]) -> Result<Self, anyhow::Error> {
        ensure!(!rows.is_empty(), AssignmentError::malformed("matrix has no rows"));
        let num_cols = rows[0].as_ref().len();
        ensure!(num_cols > 0, AssignmentError::malformed("matrix has no columns"));

        let mut values = Vec::with_capacity(rows.len() * num_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.len() == num_cols,
                AssignmentError::malformed(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    num_cols
                ))
            );
            values.extend_from_slice(row);
        }

        Ok(CostMatrix {
            num_rows: rows.len(),
            num_cols,
            values,
        })
    }

    /// Builds a matrix from row-major values.
    pub fn from_vec(
        num_rows: usize,
        num_cols: usize,
        values: Vec<C>,
    ) -> Result<Self, anyhow::Error> {
        ensure!(
            num_rows > 0 && num_cols > 0,
            AssignmentError::malformed(format!("empty shape {}x{}", num_rows, num_cols))
        );
        ensure!(
            values.len() == num_rows * num_cols,
            AssignmentError::malformed(format!(
                "{} values do not fill a {}x{} matrix",
                values.len(),
                num_rows,
                num_cols
            ))
        );
        Ok(CostMatrix {
            num_rows,
            num_cols,
            values,
        })
    }

    /// Reads a matrix in plain text format.
    ///
    /// The input starts with the number of rows and the number of columns, followed by all
    /// costs in row-major order. Tokens are separated by arbitrary whitespace.
    ///
    /// ```text
    /// 2 3
    /// 1 5 5
    /// 5 1 5
    /// ```
    pub fn read<R: BufRead>(reader: R) -> Result<Self, anyhow::Error>
    where
        C: FromStr,
        <C as FromStr>::Err: Display,
    {
        let mut tokens = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            tokens.extend(
                line.split_whitespace()
                    .map(|tok| (lineno + 1, tok.to_string())),
            );
        }
        let mut tokens = tokens.into_iter();

        let mut dimension = |what: &str| -> Result<usize, anyhow::Error> {
            let (line, tok) = tokens
                .next()
                .ok_or_else(|| AssignmentError::malformed(format!("missing {}", what)))?;
            tok.parse::<usize>().map_err(|err| {
                AssignmentError::malformed(format!(
                    "line {}: invalid {} '{}': {}",
                    line, what, tok, err
                ))
                .into()
            })
        };
        let num_rows = dimension("number of rows")?;
        let num_cols = dimension("number of columns")?;
        ensure!(
            num_rows > 0 && num_cols > 0,
            AssignmentError::malformed(format!("empty shape {}x{}", num_rows, num_cols))
        );

        let mut values = Vec::with_capacity(num_rows * num_cols);
        for (line, tok) in tokens.by_ref().take(num_rows * num_cols) {
            let value = tok.parse::<C>().map_err(|err| {
                AssignmentError::malformed(format!(
                    "line {}: invalid cost '{}': {}",
                    line, tok, err
                ))
            })?;
            values.push(value);
        }
        ensure!(
            values.len() == num_rows * num_cols,
            AssignmentError::malformed(format!(
                "expected {} costs, found {}",
                num_rows * num_cols,
                values.len()
            ))
        );
        if let Some((line, tok)) = tokens.next() {
            return Err(AssignmentError::malformed(format!(
                "line {}: unexpected trailing token '{}'",
                line, tok
            ))
            .into());
        }

        Self::from_vec(num_rows, num_cols, values)
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> C {
        self.values[row * self.num_cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[C] {
        let start = row * self.num_cols;
        &self.values[start..start + self.num_cols]
    }

    /// Returns the transposed matrix.
    ///
    /// Problems with more rows than columns have to be transposed before solving.
    pub fn transpose(&self) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        for j in 0..self.num_cols {
            values.extend((0..self.num_rows).map(|i| self.get(i, j)));
        }
        CostMatrix {
            num_rows: self.num_cols,
            num_cols: self.num_rows,
            values,
        }
    }

    /// Total cost of assigning row `i` to column `row_to_column[i]`.
    ///
    /// Fails if the sum does not fit into the cost type.
    pub fn assignment_cost(&self, row_to_column: &[usize]) -> Result<C, anyhow::Error> {
        row_to_column
            .iter()
            .enumerate()
            .try_fold(C::zero(), |acc, (i, &j)| {
                acc.checked_add(&self.get(i, j))
                    .ok_or_else(|| anyhow_error!("total cost overflows at row {}", i))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::CostMatrix;
    use crate::error::AssignmentError;
    use test_env_log::test;

    fn malformed(err: anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<AssignmentError>(),
            Some(AssignmentError::MalformedMatrix { .. })
        )
    }

    #[test]
    fn test_from_rows() {
        let matrix = CostMatrix::from_rows(&[[1, 5, 5], [5, 1, 5]]).unwrap();
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.num_cols(), 3);
        assert_eq!(matrix.row(1), &[5, 1, 5]);
        assert_eq!(matrix.get(0, 2), 5);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let rows: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![4, 5]];
        assert!(malformed(CostMatrix::from_rows(&rows).unwrap_err()));
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let no_rows: Vec<Vec<i32>> = vec![];
        assert!(malformed(CostMatrix::from_rows(&no_rows).unwrap_err()));
        let no_cols: Vec<Vec<i32>> = vec![vec![]];
        assert!(malformed(CostMatrix::from_rows(&no_cols).unwrap_err()));
        assert!(malformed(CostMatrix::<i32>::from_vec(2, 2, vec![1, 2, 3]).unwrap_err()));
    }

    #[test]
    fn test_transpose() {
        let matrix = CostMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let transposed = matrix.transpose();
        assert_eq!(transposed.num_rows(), 3);
        assert_eq!(transposed.num_cols(), 2);
        assert_eq!(transposed.row(0), &[1, 4]);
        assert_eq!(transposed.row(2), &[3, 6]);
        assert_eq!(transposed.transpose(), matrix);
    }

    #[test]
    fn test_assignment_cost() {
        let matrix = CostMatrix::from_rows(&[[4, 1, 3], [2, 0, 5], [3, 2, 2]]).unwrap();
        assert_eq!(matrix.assignment_cost(&[1, 0, 2]).unwrap(), 5);
        assert_eq!(matrix.assignment_cost(&[0, 1, 2]).unwrap(), 6);
    }

    #[test]
    fn test_assignment_cost_overflow() {
        let matrix = CostMatrix::from_rows(&[[i32::MAX, 0], [0, 1]]).unwrap();
        assert!(matrix.assignment_cost(&[0, 1]).is_err());
        assert_eq!(matrix.assignment_cost(&[1, 0]).unwrap(), 0);
    }

    #[test]
    fn test_read() {
        let input = "2 3\n1 5 5\n5 1\n  5\n";
        let matrix = CostMatrix::<i64>::read(input.as_bytes()).unwrap();
        assert_eq!(matrix, CostMatrix::from_rows(&[[1, 5, 5], [5, 1, 5]]).unwrap());
    }

    #[test]
    fn test_read_negative_costs() {
        let matrix = CostMatrix::<i32>::read("1 2 -3 7".as_bytes()).unwrap();
        assert_eq!(matrix.row(0), &[-3, 7]);
    }

    #[test]
    fn test_read_errors() {
        for input in &[
            "",
            "2",
            "x 2",
            "0 3",
            "2 2\n1 2\n3",
            "2 2\n1 2\n3 4 5",
            "1 2\n1 y",
        ] {
            let err = CostMatrix::<i32>::read(input.as_bytes()).unwrap_err();
            assert!(malformed(err), "input {:?} should be rejected", input);
        }
    }
}
