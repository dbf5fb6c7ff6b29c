//! The eight tracked contact fields and the ephemeral submission record.

use serde::{Deserialize, Serialize};

use crate::validation;

/// Identity of a tracked form field, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Q1,
    Q2,
    Q3,
}

impl FieldKey {
    /// All tracked fields in form order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Address,
        FieldKey::Q1,
        FieldKey::Q2,
        FieldKey::Q3,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FieldKey::FirstName => "firstName",
            FieldKey::LastName => "lastName",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::Address => "address",
            FieldKey::Q1 => "q1",
            FieldKey::Q2 => "q2",
            FieldKey::Q3 => "q3",
        }
    }

    pub fn is_rating(self) -> bool {
        matches!(self, FieldKey::Q1 | FieldKey::Q2 | FieldKey::Q3)
    }
}

/// Validate a single field value. Emptiness wins over every other rule;
/// address only has the non-empty requirement.
pub fn validate_value(key: FieldKey, value: &str) -> Result<(), &'static str> {
    if validation::is_empty(value) {
        return Err(validation::MSG_REQUIRED);
    }
    match key {
        FieldKey::FirstName | FieldKey::LastName => {
            if !validation::is_only_letters(value) {
                return Err(validation::MSG_LETTERS_ONLY);
            }
        }
        FieldKey::Email => {
            if !validation::is_valid_email(value) {
                return Err(validation::MSG_EMAIL);
            }
        }
        FieldKey::Phone => {
            if !validation::is_valid_phone(value) {
                return Err(validation::MSG_PHONE);
            }
        }
        FieldKey::Address => {}
        FieldKey::Q1 | FieldKey::Q2 | FieldKey::Q3 => {
            if !validation::is_valid_rating(value) {
                return Err(validation::MSG_RATING);
            }
        }
    }
    Ok(())
}

/// Ephemeral record built at submit time; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl ContactSubmission {
    /// Build the record from raw field values. Returns `None` unless all
    /// eight fields validate, so a submission can never hold invalid data.
    pub fn from_values(value_of: impl Fn(FieldKey) -> String) -> Option<Self> {
        if FieldKey::ALL
            .iter()
            .any(|&key| validate_value(key, &value_of(key)).is_err())
        {
            return None;
        }
        let rating = |key: FieldKey| value_of(key).trim().parse::<f64>().ok();
        Some(Self {
            first_name: value_of(FieldKey::FirstName).trim().to_string(),
            last_name: value_of(FieldKey::LastName).trim().to_string(),
            email: value_of(FieldKey::Email).trim().to_string(),
            phone: value_of(FieldKey::Phone).trim().to_string(),
            address: value_of(FieldKey::Address).trim().to_string(),
            q1: rating(FieldKey::Q1)?,
            q2: rating(FieldKey::Q2)?,
            q3: rating(FieldKey::Q3)?,
        })
    }

    pub fn average(&self) -> f64 {
        (self.q1 + self.q2 + self.q3) / 3.0
    }

    /// Average rendered to one decimal, as shown in the results block.
    pub fn formatted_average(&self) -> String {
        format!("{:.1}", self.average())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_value(key: FieldKey) -> String {
        match key {
            FieldKey::FirstName => "Jonas",
            FieldKey::LastName => "Jonaitis",
            FieldKey::Email => "j@j.com",
            FieldKey::Phone => "+370 612 34567",
            FieldKey::Address => "Vilnius",
            FieldKey::Q1 => "8",
            FieldKey::Q2 => "7",
            FieldKey::Q3 => "9",
        }
        .to_string()
    }

    #[test]
    fn every_field_requires_a_value() {
        for key in FieldKey::ALL {
            assert_eq!(validate_value(key, "  "), Err(validation::MSG_REQUIRED));
        }
    }

    #[test]
    fn address_only_needs_to_be_non_empty() {
        assert_eq!(validate_value(FieldKey::Address, "Vilnius"), Ok(()));
        assert_eq!(validate_value(FieldKey::Address, "Gatvė 12-3"), Ok(()));
    }

    #[test]
    fn dispatch_applies_the_right_rule_per_field() {
        assert_eq!(
            validate_value(FieldKey::FirstName, "Jonas3"),
            Err(validation::MSG_LETTERS_ONLY)
        );
        assert_eq!(
            validate_value(FieldKey::Email, "j@jcom"),
            Err(validation::MSG_EMAIL)
        );
        assert_eq!(
            validate_value(FieldKey::Phone, "370612345"),
            Err(validation::MSG_PHONE)
        );
        assert_eq!(
            validate_value(FieldKey::Q2, "11"),
            Err(validation::MSG_RATING)
        );
    }

    #[test]
    fn submission_builds_from_valid_values() {
        let sub = ContactSubmission::from_values(sample_value).expect("all fields valid");
        assert_eq!(sub.first_name, "Jonas");
        assert_eq!(sub.phone, "+370 612 34567");
        assert_eq!(sub.formatted_average(), "8.0");
    }

    #[test]
    fn submission_refuses_any_invalid_field() {
        let sub = ContactSubmission::from_values(|key| match key {
            FieldKey::Q3 => "0".to_string(),
            other => sample_value(other),
        });
        assert_eq!(sub, None);
    }
}
