#[cfg(test)]
mod tests;

pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        evaluate_int
    };
}

use crate::environment::prelude::{Environment, Value};
use error::EvalError;

pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates an integer expression.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := '(' expression ')' | number
/// number     := '-'? (digit+ | identifier)
/// ```
///
/// Identifiers are looked up in `env` and must be bound to integers.
/// Division truncates toward zero.
pub fn evaluate_int(expr: &str, env: &Environment) -> EvalResult<i64> {
    let mut evaluator = Evaluator::new(expr, env);

    let value = evaluator.parse_expression()?;

    evaluator.skip_whitespace();

    match evaluator.ch {
        None => Ok(value),
        Some(')') => Err(EvalError::UnbalancedParentheses),
        Some(found) => Err(EvalError::UnexpectedChar { found, position: evaluator.position }),
    }
}

struct Evaluator<'a> {
    src: &'a str,
    position: usize,
    ch: Option<char>,
    env: &'a Environment,
}

impl<'a> Evaluator<'a> {
    fn new(src: &'a str, env: &'a Environment) -> Self {
        Self {
            src,
            position: 0,
            ch: src.chars().next(),
            env,
        }
    }

    fn next_char(&mut self) {
        if let Some(ch) = self.ch {
            self.position += ch.len_utf8();
            self.ch = self.src[self.position..].chars().next();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(ch) if ch.is_whitespace()) {
            self.next_char();
        }
    }

    /// Consumes `expected` if it is the next non-blank character.
    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();

        if self.ch == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn parse_expression(&mut self) -> EvalResult<i64> {
        let mut value = self.parse_term()?;

        loop {
            if self.eat('+') {
                let right = self.parse_term()?;
                value = value.checked_add(right).ok_or(EvalError::Overflow)?;
            } else if self.eat('-') {
                let right = self.parse_term()?;
                value = value.checked_sub(right).ok_or(EvalError::Overflow)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_term(&mut self) -> EvalResult<i64> {
        let mut value = self.parse_factor()?;

        loop {
            if self.eat('*') {
                let right = self.parse_factor()?;
                value = value.checked_mul(right).ok_or(EvalError::Overflow)?;
            } else if self.eat('/') {
                let right = self.parse_factor()?;

                if right == 0 {
                    return Err(EvalError::DivisionByZero);
                }

                value = value.checked_div(right).ok_or(EvalError::Overflow)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_factor(&mut self) -> EvalResult<i64> {
        if self.eat('(') {
            let value = self.parse_expression()?;

            if !self.eat(')') {
                return Err(EvalError::UnbalancedParentheses);
            }

            return Ok(value);
        }

        self.parse_number()
    }

    fn parse_number(&mut self) -> EvalResult<i64> {
        let negative = self.eat('-');

        self.skip_whitespace();

        let value = match self.ch {
            Some(ch) if ch.is_ascii_digit() => self.parse_digits()?,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.parse_identifier()?,
            Some(found) => return Err(EvalError::UnexpectedChar { found, position: self.position }),
            None => return Err(EvalError::UnexpectedEnd),
        };

        if negative {
            value.checked_neg().ok_or(EvalError::Overflow)
        } else {
            Ok(value)
        }
    }

    fn parse_digits(&mut self) -> EvalResult<i64> {
        let mut value: i64 = 0;

        while let Some(digit) = self.ch.and_then(|ch| ch.to_digit(10)) {
            value = value.checked_mul(10)
                .and_then(|value| value.checked_add(digit as i64))
                .ok_or(EvalError::Overflow)?;

            self.next_char();
        }

        Ok(value)
    }

    fn parse_identifier(&mut self) -> EvalResult<i64> {
        let start = self.position;

        while matches!(self.ch, Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.next_char();
        }

        let name = &self.src[start..self.position];

        match self.env.get(name) {
            Some(Value::Integer { value }) => Ok(*value),
            Some(other) => Err(EvalError::NotAnInteger {
                name: name.to_string(),
                found: other.value_type(),
            }),
            None => Err(EvalError::UndefinedVariable { name: name.to_string() }),
        }
    }
}
