use num_traits::{NumAssign, PrimInt};
use std::fmt::{Debug, Display};

/// Integer type usable as an entry of a cost matrix.
pub trait Cost: PrimInt + NumAssign + Display + Debug {}

impl<T> Cost for T where T: PrimInt + NumAssign + Display + Debug {}

///
/// Solution of the linear assignment problem
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<C>
where
    C: Cost,
{
    /// index i gives the column assigned to row i
    pub row_to_column: Vec<usize>,
    /// index j gives the row assigned to column j
    ///
    /// Columns that are left unused by a rectangular problem are marked by `usize::MAX`
    pub column_to_row: Vec<usize>,
    /// total cost of the assignment, measured on the caller's matrix
    pub cost: C,
}

impl<C> Assignment<C>
where
    C: Cost,
{
    pub fn new(row_capacity: usize, column_capacity: usize) -> Assignment<C> {
        Assignment::<C> {
            row_to_column: Vec::with_capacity(row_capacity),
            column_to_row: Vec::with_capacity(column_capacity),
            cost: C::zero(),
        }
    }

    /// Number of assigned rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.row_to_column.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_to_column.is_empty()
    }

    /// Iterates over `(row, column)` pairs of the assignment.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_to_column.iter().copied().enumerate()
    }
}
