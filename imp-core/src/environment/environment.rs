use std::collections::HashMap;

use super::prelude::{Value, ValueType};

/// One global table of declared names; the language has no block scoping,
/// so a variable declared inside a loop or branch body stays visible for
/// the rest of the run. Entries are never removed.
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

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Creates an entry holding the type-appropriate zero value.
    pub fn declare(&mut self, name: String, value_type: ValueType) {
        let default_value = match value_type {
            ValueType::Integer => Value::Integer { value: 0 },
            ValueType::Float => Value::Float { value: 0.0 },
            ValueType::String => Value::String { value: "".to_string() },
            ValueType::Boolean => Value::Boolean { value: false },
        };

        self.store.insert(name, default_value);
    }

    /// Creates an entry with an already-checked initial value.
    pub fn declare_with(&mut self, name: String, value: Value) {
        self.store.insert(name, value);
    }

    /// Overwrites an existing entry. The caller is responsible for the
    /// declare-before-assign check.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(var) = self.store.get_mut(name) {
            *var = value;
        }
    }
}
