use std::collections::HashMap;

use thiserror::Error;

use super::prelude::{Value, ValueType};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvironmentError {
    #[error("Error: Undefined variable → {name}")]
    Undefined {
        name: String
    },
    #[error("cannot assign `{got}` to `{name}` of type `{expected}`")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        got: ValueType,
    },
}

/// Session-scoped variable store. Each name owns exactly one binding,
/// tagged by the type of its value.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn get_typed(&self, value_type: ValueType, name: &str) -> Option<&Value> {
        self.get(name)
            .filter(|value| value.value_type() == value_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn contains_typed(&self, value_type: ValueType, name: &str) -> bool {
        self.get_typed(value_type, name).is_some()
    }

    /// Creates or replaces the binding for `name`, returning the previous value.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.store.insert(name.into(), value)
    }

    /// Replaces the value of an existing binding of the same type.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EnvironmentError> {
        let var = self.store.get_mut(name)
            .ok_or_else(|| EnvironmentError::Undefined { name: name.to_string() })?;

        if var.value_type() != value.value_type() {
            return Err(EnvironmentError::TypeMismatch {
                name: name.to_string(),
                expected: var.value_type(),
                got: value.value_type(),
            });
        }

        *var = value;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Bindings ordered by name.
    pub fn bindings(&self) -> Vec<(&str, &Value)> {
        let mut bindings = self.store.iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect::<Vec<_>>();

        bindings.sort_by_key(|(name, _)| *name);

        bindings
    }
}
