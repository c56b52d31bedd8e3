
pub mod prelude {
    pub use super::{
        invoke, parse_call, resolve_argument, split_arguments, BridgeError, Call
    };
}

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{
    catalog::prelude::{BuiltinError, Catalog},
    environment::prelude::{Environment, Value, ValueType, FALSE, TRUE},
};

static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\s*\((.*)\)$").expect("call pattern")
});
static INT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+$").expect("integer pattern")
});
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("decimal pattern")
});

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Function '{name}' with these parameter types not found")]
    NotFound {
        name: String,
        params: Vec<ValueType>,
    },
    #[error(transparent)]
    Builtin(#[from] BuiltinError),
}

/// A `name(args)` expression split into its parts. `args` is the raw text
/// between the outermost parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

pub fn parse_call(text: &str) -> Option<Call<'_>> {
    let captures = CALL.captures(text.trim())?;

    Some(Call {
        name: captures.get(1)?.as_str(),
        args: captures.get(2)?.as_str(),
    })
}

/// Splits on commas that are not inside a quoted literal. Blank input has
/// no arguments.
pub fn split_arguments(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return vec![];
    }

    let mut args = vec![];
    let mut quoted = false;
    let mut start = 0;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                args.push(raw[start..idx].trim());
                start = idx + 1;
            },
            _ => {}
        }
    }

    args.push(raw[start..].trim());

    args
}

/// Turns one raw argument into a value. Numeric variables win over literals,
/// literals win over text and boolean variables.
pub fn resolve_argument(raw: &str, env: &Environment) -> Result<Value, BridgeError> {
    let invalid = || BridgeError::InvalidArgument(raw.to_string());

    let value = match env.get(raw) {
        Some(value) if value.is_numeric() => value.clone(),
        _ if INT_LITERAL.is_match(raw) => raw.parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid())?,
        _ if DECIMAL_LITERAL.is_match(raw) => raw.parse::<f64>()
            .map(Value::from)
            .map_err(|_| invalid())?,
        _ if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') => {
            Value::text(&raw[1..raw.len() - 1])
        },
        Some(value @ Value::Text { .. }) => value.clone(),
        Some(value @ Value::Boolean { .. }) => value.clone(),
        _ => match raw {
            "true" => TRUE,
            "false" => FALSE,
            _ => return Err(invalid()),
        },
    };

    tracing::trace!("resolved argument `{raw}` to {:?}", value);

    Ok(value)
}

/// Calls the builtin `name` with `raw_args` resolved against `env`.
///
/// The exact signature is tried first. If none matches, every integer
/// argument is widened to a double and the lookup is retried once.
pub fn invoke(
    catalog: &Catalog,
    name: &str,
    raw_args: &str,
    env: &Environment,
) -> Result<Option<Value>, BridgeError> {
    let args = split_arguments(raw_args)
        .into_iter()
        .map(|raw| resolve_argument(raw, env))
        .collect::<Result<Vec<Value>, BridgeError>>()?;

    let params = args.iter()
        .map(Value::value_type)
        .collect::<Vec<ValueType>>();

    if let Some(builtin) = catalog.lookup(name, &params) {
        tracing::debug!("calling {name}{params:?}");

        return Ok(builtin.call(&args)?);
    }

    let widened_params = params.iter()
        .map(|param| param.widen())
        .collect::<Vec<ValueType>>();

    if widened_params != params {
        if let Some(builtin) = catalog.lookup(name, &widened_params) {
            tracing::debug!("calling {name}{widened_params:?} after widening {params:?}");

            let widened_args = args.into_iter()
                .map(Value::widen)
                .collect::<Vec<Value>>();

            return Ok(builtin.call(&widened_args)?);
        }
    }

    Err(BridgeError::NotFound { name: name.to_string(), params })
}
