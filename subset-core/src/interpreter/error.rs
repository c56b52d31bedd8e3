use thiserror::Error;

use crate::{
    bridge::prelude::BridgeError,
    environment::prelude::{EnvironmentError, ValueType},
    eval::prelude::EvalError,
    utils::prelude::SrcSpan,
};

/// A failed statement. The `Display` form is the line written to the output.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Syntax Error: Unsupported statement → {line}")]
    Unsupported {
        line: String,
    },
    #[error("Error: Invalid print statement")]
    InvalidPrint,
    #[error("Invalid integer value: {value}")]
    InvalidInteger {
        value: String,
    },
    #[error("Invalid double value: {value}")]
    InvalidDouble {
        value: String,
    },
    #[error("Invalid string value: {value}")]
    InvalidString {
        value: String,
    },
    #[error("Invalid string assignment")]
    InvalidStringAssignment,
    #[error("Invalid boolean value: {value}")]
    InvalidBoolean {
        value: String,
    },
    #[error("Error: Function must return an integer for int assignment")]
    NotAnInteger,
    #[error("Error: Function must return a number for {declared} assignment")]
    NotANumber {
        declared: ValueType,
    },
    #[error("Error: Invalid arithmetic expression → {expression}")]
    Evaluation {
        expression: String,
        source: EvalError,
    },
    #[error("Error: Cannot evaluate {expression}")]
    CannotEvaluate {
        expression: String,
    },
    #[error("Error: {0}")]
    Call(#[from] BridgeError),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

impl StatementError {
    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::Unsupported { .. } | Self::InvalidPrint => ProblemKind::Syntax,
            Self::InvalidInteger { .. }
            | Self::InvalidDouble { .. }
            | Self::InvalidString { .. }
            | Self::InvalidStringAssignment
            | Self::InvalidBoolean { .. }
            | Self::NotAnInteger
            | Self::NotANumber { .. } => ProblemKind::Declaration,
            Self::Evaluation { .. } | Self::CannotEvaluate { .. } => ProblemKind::Evaluation,
            Self::Call(_) | Self::Environment(_) => ProblemKind::Resolution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    Syntax,
    Declaration,
    Evaluation,
    Resolution,
}

/// An inline error, kept with the source line it was reported on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub kind: ProblemKind,
    /// 1-based.
    pub line: usize,
    pub span: SrcSpan,
    pub message: String,
    /// Why evaluation failed, when the message does not say.
    pub cause: Option<String>,
}

impl Problem {
    pub fn new(error: &StatementError, line: usize, span: SrcSpan) -> Self {
        Self {
            kind: error.kind(),
            line,
            span,
            message: error.to_string(),
            cause: match error {
                StatementError::Evaluation { source, .. } => Some(source.to_string()),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionWarning {
    Redeclaration {
        location: SrcSpan,
        name: String,
        previous: ValueType,
        declared: ValueType,
    },
    SplitQuotedLiteral {
        location: SrcSpan,
    },
}
