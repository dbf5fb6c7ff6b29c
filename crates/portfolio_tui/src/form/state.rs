use std::collections::HashMap;

use portfolio_core::contact::FieldKey;

use super::{FormField, FormSchema};

/// Mutable state captured while editing the form: current values plus the
/// per-field validation errors driving the inline messages.
#[derive(Default, Clone)]
pub struct FormState {
    values: HashMap<FieldKey, String>,
    errors: HashMap<FieldKey, &'static str>,
}

impl FormState {
    pub fn set_value(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn value(&self, key: FieldKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, key: FieldKey) -> Option<&'static str> {
        self.errors.get(&key).copied()
    }

    /// Re-validate one field, updating its inline error. Returns validity.
    pub fn validate_field(&mut self, field: &FormField) -> bool {
        match field.validate(self.value(field.key)) {
            Ok(()) => {
                self.errors.remove(&field.key);
                true
            }
            Err(msg) => {
                self.errors.insert(field.key, msg);
                false
            }
        }
    }

    /// Re-validate every field. Returns overall validity — the submit
    /// control is enabled exactly when this is true.
    pub fn validate_all(&mut self, schema: &FormSchema) -> bool {
        let mut all_valid = true;
        for field in &schema.fields {
            if !self.validate_field(field) {
                all_valid = false;
            }
        }
        all_valid
    }
}
