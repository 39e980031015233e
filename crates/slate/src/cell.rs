//! The cell: contents plus a memoized value

use crate::sheet::Sheet;
use slate_core::{Error, Position, Result, Value, ESCAPE_SIGN, FORMULA_SIGN};
use slate_formula::Formula;
use std::cell::RefCell;

/// What a cell holds: nothing, literal text, or a parsed formula
#[derive(Debug)]
enum Contents {
    Empty,
    Text(String),
    Formula(Formula),
}

impl Contents {
    fn parse(text: String) -> Result<Self> {
        if text.is_empty() {
            Ok(Contents::Empty)
        } else if text.starts_with(FORMULA_SIGN) && text.len() > 1 {
            let formula = Formula::parse(&text[1..])
                .map_err(|e| Error::FormulaParse(e.to_string()))?;
            Ok(Contents::Formula(formula))
        } else {
            // Includes a lone "=", which stays text
            Ok(Contents::Text(text))
        }
    }
}

/// A single cell of the sheet
///
/// The cell computes its own value on demand and memoizes it. The memo is
/// interior-mutable so reads stay `&self`; it is dropped whenever the cell is
/// rewritten or a transitive dependency changes (the sheet walks reverse
/// reachability and calls [`Cell::reset_cache`]).
#[derive(Debug, Default)]
pub struct Cell {
    contents: Contents,
    cache: RefCell<Option<Value>>,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cell's contents
    ///
    /// Empty text makes the cell empty; text starting with `=` and longer
    /// than the sign alone is parsed as a formula; anything else is literal
    /// text. On a formula parse failure the previous contents and cache are
    /// left untouched. A successful set drops this cell's memoized value but
    /// never touches the dependency graph - that is the sheet's job.
    pub fn set(&mut self, text: impl Into<String>) -> Result<()> {
        self.contents = Contents::parse(text.into())?;
        self.cache.borrow_mut().take();
        Ok(())
    }

    /// Make the cell empty. Equivalent to `set("")`.
    pub fn clear(&mut self) {
        self.contents = Contents::Empty;
        self.cache.borrow_mut().take();
    }

    /// The cell's value, computed against `sheet` and memoized
    ///
    /// Empty cells read as `""`; text cells as their text with a single
    /// leading escape sign stripped; formula cells as the evaluation result.
    pub fn value(&self, sheet: &Sheet) -> Value {
        if let Some(cached) = self.cache.borrow().clone() {
            return cached;
        }
        let value = self.compute_value(sheet);
        *self.cache.borrow_mut() = Some(value.clone());
        value
    }

    fn compute_value(&self, sheet: &Sheet) -> Value {
        match &self.contents {
            Contents::Empty => Value::default(),
            Contents::Text(text) => {
                let display = text.strip_prefix(ESCAPE_SIGN).unwrap_or(text);
                Value::String(display.to_string())
            }
            Contents::Formula(formula) => {
                match formula.evaluate(&|pos| sheet.lookup_value(pos)) {
                    Ok(number) => Value::Number(number),
                    Err(error) => Value::Error(error),
                }
            }
        }
    }

    /// The canonical textual form of the contents
    ///
    /// Text cells keep their escape sign; formula cells re-emit the canonical
    /// expression behind a leading `=`.
    pub fn text(&self) -> String {
        match &self.contents {
            Contents::Empty => String::new(),
            Contents::Text(text) => text.clone(),
            Contents::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    /// The distinct positions a formula cell references; empty otherwise
    pub fn referenced_cells(&self) -> &[Position] {
        match &self.contents {
            Contents::Formula(formula) => formula.referenced_cells(),
            _ => &[],
        }
    }

    /// Drop the memoized value. Idempotent, any state.
    pub fn reset_cache(&self) {
        self.cache.borrow_mut().take();
    }

    /// Check if the cell holds nothing
    pub fn is_empty(&self) -> bool {
        matches!(self.contents, Contents::Empty)
    }

    /// Check if the cell holds a formula
    pub fn is_formula(&self) -> bool {
        matches!(self.contents, Contents::Formula(_))
    }
}
