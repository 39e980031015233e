//! # slate-formula
//!
//! The formula subsystem of the slate spreadsheet engine:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST → value, under a cell lookup)
//! - Canonical re-emission (AST → minimal-parentheses text)
//! - The dependency graph linking formula cells to their referents
//!
//! ## Example
//!
//! ```rust
//! use slate_formula::Formula;
//! use slate_core::Value;
//!
//! let formula = Formula::parse("(1+2)*A1").unwrap();
//! assert_eq!(formula.expression(), "(1+2)*A1");
//!
//! let result = formula.evaluate(&|_| Value::Number(10.0));
//! assert_eq!(result, Ok(30.0));
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use dependency::DependencyGraph;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvalResult};
pub use parser::parse_expression;

use slate_core::{Position, Value};

/// A parsed formula
///
/// Wraps the expression tree together with its reference list, which is
/// computed once at parse time: distinct in-bounds positions in AST traversal
/// order (depth-first, left to right), first occurrence kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: Expr,
    referenced_cells: Vec<Position>,
}

impl Formula {
    /// Parse an expression string (the text after the leading `=`)
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        let expr = parse_expression(expression)?;
        let mut referenced_cells = Vec::new();
        collect_references(&expr, &mut referenced_cells);
        Ok(Self {
            expr,
            referenced_cells,
        })
    }

    /// Evaluate under a cell-value lookup
    pub fn evaluate(&self, lookup: &dyn Fn(Position) -> Value) -> EvalResult {
        evaluate(&self.expr, lookup)
    }

    /// The canonical textual form of the expression, without the leading `=`
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// The distinct in-bounds positions this formula references
    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced_cells
    }
}

fn collect_references(expr: &Expr, refs: &mut Vec<Position>) {
    match expr {
        Expr::Reference(pos) => {
            if !refs.contains(pos) {
                refs.push(*pos);
            }
        }
        Expr::UnaryOp { operand, .. } => collect_references(operand, refs),
        Expr::BinaryOp { left, right, .. } => {
            collect_references(left, refs);
            collect_references(right, refs);
        }
        // Literals and out-of-range references contribute nothing
        Expr::Number(_) | Expr::OutOfRangeRef(_) => {}
    }
}
