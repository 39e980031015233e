//! # slate-core
//!
//! Core data types for the slate spreadsheet engine:
//! - [`Position`] and [`Size`] - grid coordinates and the printable bounding box
//! - [`Value`] - the observable value of a cell (number, string, or error)
//! - [`CellError`] - value-level evaluation errors (`#REF!`, `#VALUE!`, `#ARITHM!`)
//! - [`Error`] - caller-facing failures (invalid positions, parse errors, cycles)
//!
//! ## Example
//!
//! ```rust
//! use slate_core::Position;
//!
//! let pos = Position::parse("C5").unwrap();
//! assert_eq!((pos.row, pos.col), (4, 2));
//! assert_eq!(pos.to_string(), "C5");
//! ```

pub mod error;
pub mod position;
pub mod value;

pub use error::{Error, Result};
pub use position::{Position, Size};
pub use value::{CellError, Value};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u16 = 16_384;

/// Leading character marking a formula cell (`=1+A2`)
pub const FORMULA_SIGN: char = '=';

/// Leading character escaping a text cell (`'=not a formula`)
pub const ESCAPE_SIGN: char = '\'';
