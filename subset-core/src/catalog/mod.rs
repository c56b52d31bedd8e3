pub mod builtins;

pub mod prelude {
    pub use super::{
        Builtin, BuiltinError, BuiltinFn, BuiltinResult, Catalog, Signature
    };
}


use std::collections::HashMap;

use thiserror::Error;

use crate::environment::prelude::{Value, ValueType};

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("{path} ({source})")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        index: i64,
        length: usize,
    },
    #[error("/ by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("argument {index} should be {expected}")]
    ArgumentType {
        index: usize,
        expected: ValueType,
    },
}

/// `None` stands for a builtin that returns nothing.
pub type BuiltinResult = Result<Option<Value>, BuiltinError>;
pub type BuiltinFn = fn(&[Value]) -> BuiltinResult;

/// Lookup key: the builtin name and its exact parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub params: Vec<ValueType>,
}

impl Signature {
    pub fn new(name: impl Into<String>, params: &[ValueType]) -> Self {
        Self {
            name: name.into(),
            params: params.to_vec(),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub params: &'static [ValueType],
    pub func: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Builtin {
    pub fn signature(&self) -> Signature {
        Signature::new(self.name, self.params)
    }

    pub fn call(&self, args: &[Value]) -> BuiltinResult {
        (self.func)(args)
    }
}

/// Name-plus-signature indexed table of builtins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    table: HashMap<Signature, Builtin>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The string, math, file and system builtins.
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        for builtin in builtins::STANDARD {
            catalog.register(*builtin);
        }

        catalog
    }

    /// Adds `builtin`, replacing any entry with the same signature.
    pub fn register(&mut self, builtin: Builtin) -> Option<Builtin> {
        self.table.insert(builtin.signature(), builtin)
    }

    pub fn lookup(&self, name: &str, params: &[ValueType]) -> Option<&Builtin> {
        self.table.get(&Signature::new(name, params))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.table.keys().any(|signature| signature.name == name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.table.keys()
    }
}
