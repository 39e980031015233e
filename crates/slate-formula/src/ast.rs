//! Formula expression tree and its canonical textual form

use slate_core::Position;
use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Cell reference within the sheet bounds
    Reference(Position),
    /// A reference-shaped token outside the sheet bounds; evaluates to `#REF!`
    OutOfRangeRef(String),
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    /// Whether a right child of equal precedence still needs parentheses
    /// (`a-(b+c)` and `a/(b*c)` change meaning without them)
    fn right_sensitive(&self) -> bool {
        matches!(self, BinaryOperator::Subtract | BinaryOperator::Divide)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

const UNARY_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 4;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Reference(_) | Expr::OutOfRangeRef(_) => ATOM_PRECEDENCE,
            Expr::UnaryOp { .. } => UNARY_PRECEDENCE,
            Expr::BinaryOp { op, .. } => op.precedence(),
        }
    }
}

/// Canonical re-emission with minimal parentheses.
///
/// The output is stable under a parse/print round trip: re-parsing a printed
/// expression prints the identical string.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Reference(pos) => write!(f, "{}", pos),
            Expr::OutOfRangeRef(text) => write!(f, "{}", text),
            Expr::UnaryOp { op, operand } => {
                match op {
                    UnaryOperator::Negate => write!(f, "-")?,
                }
                if operand.precedence() < UNARY_PRECEDENCE {
                    write!(f, "({})", operand)
                } else {
                    write!(f, "{}", operand)
                }
            }
            Expr::BinaryOp { op, left, right } => {
                if left.precedence() < op.precedence() {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, "{}", op.symbol())?;
                let parens = right.precedence() < op.precedence()
                    || (right.precedence() == op.precedence() && op.right_sensitive());
                if parens {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn canonical(input: &str) -> String {
        parse_expression(input).unwrap().to_string()
    }

    #[test]
    fn test_drops_redundant_parens() {
        assert_eq!(canonical("(1+2)"), "1+2");
        assert_eq!(canonical("((A1))"), "A1");
        assert_eq!(canonical("(1*2)+(3*4)"), "1*2+3*4");
        assert_eq!(canonical("1+(2+3)"), "1+2+3");
    }

    #[test]
    fn test_keeps_required_parens() {
        assert_eq!(canonical("(1+2)*3"), "(1+2)*3");
        assert_eq!(canonical("1-(2+3)"), "1-(2+3)");
        assert_eq!(canonical("1/(2*3)"), "1/(2*3)");
        assert_eq!(canonical("-(1+2)"), "-(1+2)");
    }

    #[test]
    fn test_unary_forms() {
        assert_eq!(canonical("-5"), "-5");
        assert_eq!(canonical("--5"), "--5");
        assert_eq!(canonical("-A1*B1"), "-A1*B1");
        assert_eq!(canonical("1--2"), "1--2");
        assert_eq!(canonical("+5"), "5");
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        for input in [
            "1+2*3",
            "(1+2)*3",
            "1-(2-3)",
            "-(A1+B2)/C3",
            "1/(2/3)",
            "--(1+2)",
            "2-3-4",
            "0.25+1e3",
        ] {
            let once = canonical(input);
            assert_eq!(canonical(&once), once, "not idempotent for '{}'", input);
        }
    }
}
