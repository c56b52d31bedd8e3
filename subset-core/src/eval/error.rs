use thiserror::Error;

use crate::environment::prelude::ValueType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("unexpected `{found}` at {position}")]
    UnexpectedChar {
        found: char,
        position: usize,
    },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("undefined variable `{name}`")]
    UndefinedVariable {
        name: String
    },
    #[error("`{name}` is {found}, expected int")]
    NotAnInteger {
        name: String,
        found: ValueType,
    },
}
