use portfolio_core::contact::{self, FieldKey};

/// Editor behavior of a field. All fields are single-line text editors;
/// the kind decides extra input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Auto-formatted as `+370 6xx xxxxx` on every keystroke.
    Phone,
    /// Numeric rating in `[1, 10]`.
    Rating,
}

/// Declarative description of one tracked form field.
pub struct FormField {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: FieldKind,
    pub help: Option<&'static str>,
}

impl FormField {
    pub fn new(key: FieldKey, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            help: None,
        }
    }

    pub fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Dispatch to the core validator for this field.
    pub fn validate(&self, value: &str) -> Result<(), &'static str> {
        contact::validate_value(self.key, value)
    }
}
