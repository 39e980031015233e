//! # slate
//!
//! A spreadsheet computation engine: a two-dimensional table of cells whose
//! contents are literal text or formulas over other cells, with cached,
//! on-demand evaluation and cycle prevention.
//!
//! Three things stay consistent under every mutation:
//! - the dependency graph of inter-cell references, cycle-checked on write;
//! - the per-cell memoized values, invalidated transitively when a
//!   dependency changes;
//! - the formula subsystem (parse, evaluate, enumerate references), which
//!   both consumes and feeds the graph.
//!
//! ## Example
//!
//! ```rust
//! use slate::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(Position::parse("B1").unwrap(), "2").unwrap();
//! sheet.set_cell(Position::parse("A1").unwrap(), "=B1+1").unwrap();
//!
//! assert_eq!(
//!     sheet.value(Position::parse("A1").unwrap()).unwrap(),
//!     Value::Number(3.0)
//! );
//!
//! // Rewriting B1 invalidates everything that depends on it
//! sheet.set_cell(Position::parse("B1").unwrap(), "5").unwrap();
//! assert_eq!(
//!     sheet.value(Position::parse("A1").unwrap()).unwrap(),
//!     Value::Number(6.0)
//! );
//! ```

pub mod cell;
pub mod prelude;
pub mod sheet;

pub use cell::Cell;
pub use sheet::Sheet;

// Re-export core types
pub use slate_core::{
    CellError, Error, Position, Result, Size, Value, ESCAPE_SIGN, FORMULA_SIGN, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use slate_formula::{DependencyGraph, Formula, FormulaError, FormulaResult};
