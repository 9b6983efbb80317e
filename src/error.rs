use std::error;
use std::fmt;

/// Error kinds reported by the assignment solver.
///
/// Solver functions return `anyhow::Error`; use `downcast_ref::<AssignmentError>()`
/// to find out which kind of failure occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// The matrix has more rows than columns. Transpose it and solve again.
    ShapeUnsupported { num_rows: usize, num_cols: usize },
    /// The matrix is empty or its rows differ in length.
    MalformedMatrix { msg: String },
}

impl AssignmentError {
    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        AssignmentError::MalformedMatrix { msg: msg.into() }
    }
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::AssignmentError::*;
        match self {
            ShapeUnsupported { num_rows, num_cols } => write!(
                fmt,
                "unsupported shape {}x{}: more rows than columns, transpose the matrix first",
                num_rows, num_cols
            ),
            MalformedMatrix { msg } => write!(fmt, "malformed matrix: {}", msg),
        }
    }
}

impl error::Error for AssignmentError {}
