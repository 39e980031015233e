//! Formula evaluator
//!
//! Evaluates an expression tree under a cell-value lookup supplied by the
//! sheet. The evaluator never touches the sheet directly; all reference
//! resolution goes through the lookup.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use slate_core::{CellError, Position, Value};

/// Outcome of an evaluation: a number, or a value-level error
pub type EvalResult = std::result::Result<f64, CellError>;

/// Evaluate an expression under a cell-value lookup
///
/// Reference coercion rules:
/// - empty cells (and cells that have never existed) count as `0.0`;
/// - numeric values are used as-is;
/// - strings that parse cleanly as a number are used as that number,
///   any other string is a `#VALUE!` error;
/// - error values propagate unchanged.
///
/// Any arithmetic step with a non-finite result (division by zero,
/// overflow) is a `#ARITHM!` error.
pub fn evaluate(expr: &Expr, lookup: &dyn Fn(Position) -> Value) -> EvalResult {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Reference(pos) => coerce_to_number(lookup(*pos)),
        Expr::OutOfRangeRef(_) => Err(CellError::Ref),
        Expr::UnaryOp { op, operand } => {
            let value = evaluate(operand, lookup)?;
            match op {
                UnaryOperator::Negate => Ok(-value),
            }
        }
        Expr::BinaryOp { op, left, right } => {
            let left = evaluate(left, lookup)?;
            let right = evaluate(right, lookup)?;
            let result = match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Subtract => left - right,
                BinaryOperator::Multiply => left * right,
                BinaryOperator::Divide => left / right,
            };
            if result.is_finite() {
                Ok(result)
            } else {
                Err(CellError::Arithm)
            }
        }
    }
}

fn coerce_to_number(value: Value) -> EvalResult {
    match value {
        Value::Number(n) => Ok(n),
        Value::String(s) if s.is_empty() => Ok(0.0),
        Value::String(s) => s.parse().map_err(|_| CellError::Value),
        Value::Error(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn eval_with(input: &str, lookup: impl Fn(Position) -> Value) -> EvalResult {
        evaluate(&parse_expression(input).unwrap(), &lookup)
    }

    fn eval(input: &str) -> EvalResult {
        eval_with(input, |_| Value::default())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1+2*3"), Ok(7.0));
        assert_eq!(eval("(1+2)*3"), Ok(9.0));
        assert_eq!(eval("7/2"), Ok(3.5));
        assert_eq!(eval("-3-4"), Ok(-7.0));
        assert_eq!(eval("--5"), Ok(5.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1/0"), Err(CellError::Arithm));
        assert_eq!(eval("0/0"), Err(CellError::Arithm));
        assert_eq!(eval("1/(2-2)"), Err(CellError::Arithm));
    }

    #[test]
    fn test_overflow_is_arithmetic_error() {
        assert_eq!(eval("1e308*10"), Err(CellError::Arithm));
    }

    #[test]
    fn test_reference_coercions() {
        let lookup = |pos: Position| -> Value {
            match pos.to_string().as_str() {
                "A1" => Value::Number(2.5),
                "A2" => Value::String("17".into()),
                "A3" => Value::String("".into()),
                "A4" => Value::String("not a number".into()),
                "A5" => Value::Error(CellError::Arithm),
                _ => Value::default(),
            }
        };

        assert_eq!(eval_with("A1*2", lookup), Ok(5.0));
        assert_eq!(eval_with("A2+1", lookup), Ok(18.0));
        assert_eq!(eval_with("A3+1", lookup), Ok(1.0)); // empty string is 0
        assert_eq!(eval_with("B7+1", lookup), Ok(1.0)); // untouched cell is 0
        assert_eq!(eval_with("A4+1", lookup), Err(CellError::Value));
        assert_eq!(eval_with("A5+1", lookup), Err(CellError::Arithm)); // propagation
    }

    #[test]
    fn test_out_of_range_reference() {
        assert_eq!(eval("ZZZZ1"), Err(CellError::Ref));
        assert_eq!(eval("1+ZZZZ1"), Err(CellError::Ref));
    }

    #[test]
    fn test_error_short_circuits_left_to_right() {
        // The left operand's error wins over the right's
        let lookup = |pos: Position| -> Value {
            match pos.to_string().as_str() {
                "A1" => Value::Error(CellError::Value),
                "A2" => Value::Error(CellError::Arithm),
                _ => Value::default(),
            }
        };
        assert_eq!(eval_with("A1+A2", lookup), Err(CellError::Value));
    }
}
