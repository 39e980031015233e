//! Prelude module - common imports for slate users
//!
//! ```rust
//! use slate::prelude::*;
//! ```

pub use crate::{
    // The engine
    Cell,
    CellError,
    // Error types
    Error,
    // Formula types
    Formula,
    FormulaError,
    Position,
    Result,
    Sheet,
    Size,
    // Value types
    Value,
};
