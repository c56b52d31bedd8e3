pub mod lexer;
pub mod environment;
pub mod eval;
pub mod catalog;
pub mod bridge;
pub mod interpreter;
pub mod utils;

pub mod prelude {
    pub use super::{
        lexer::prelude::{tokenize, Token, TokenKind, DisplayTable},
        environment::prelude::{Environment, Value, ValueType},
        interpreter::prelude::{Session, Report, Problem, ProblemKind},
        utils::prelude::{Error, WarningEmitterIO}
    };
}
