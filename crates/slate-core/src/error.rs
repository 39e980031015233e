//! Error types for slate-core

use crate::position::Position;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-facing failures
///
/// Every variant leaves the sheet exactly as it was before the failing call.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed textual position
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Sheet operation addressed a position outside the sheet bounds
    #[error("Invalid position: row = {}, col = {}", .0.row, .0.col)]
    InvalidPosition(Position),

    /// Malformed formula text
    #[error("Formula parse error: {0}")]
    FormulaParse(String),

    /// The write would create a reference cycle
    #[error("Circular reference detected involving cell {0}")]
    CircularReference(Position),
}

impl Error {
    /// Check if this is a position-validity failure
    pub fn is_invalid_position(&self) -> bool {
        matches!(self, Error::InvalidPosition(_))
    }

    /// Check if this is a formula parse failure
    pub fn is_formula_parse(&self) -> bool {
        matches!(self, Error::FormulaParse(_))
    }

    /// Check if this is a circular-reference failure
    pub fn is_circular_reference(&self) -> bool {
        matches!(self, Error::CircularReference(_))
    }
}
