//! Credential field validators.

use portal_common::Field;
use portal_common::constants::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use std::collections::BTreeMap;
use std::fmt;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    TooShort { min: usize },
}

impl ValidationError {
    /// Message shown under the offending field
    pub fn message(&self, field: Field) -> String {
        match (field, self) {
            (Field::Username, Self::Required) => "University ID is required".to_string(),
            (Field::Username, Self::TooShort { min }) => {
                format!("ID must be at least {min} characters")
            }
            (Field::Password, Self::Required) => "Password is required".to_string(),
            (Field::Password, Self::TooShort { min }) => {
                format!("Password must be at least {min} characters")
            }
        }
    }
}

/// Field → error mapping, ordered so the username comes first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: Field) -> Option<ValidationError> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.message(field))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First invalid field; the username takes priority
    pub fn first(&self) -> Option<Field> {
        self.0.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.iter().map(|(field, e)| e.message(field)).collect();
        f.write_str(&messages.join("; "))
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required)
    } else if trimmed.chars().count() < MIN_USERNAME_LEN {
        Err(ValidationError::TooShort { min: MIN_USERNAME_LEN })
    } else {
        Ok(())
    }
}

/// Passwords are not trimmed: whitespace counts toward the length.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::Required)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::TooShort { min: MIN_PASSWORD_LEN })
    } else {
        Ok(())
    }
}

/// Check both fields, collecting every error instead of stopping at the first.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(e) = validate_username(username) {
        errors.insert(Field::Username, e);
    }
    if let Err(e) = validate_password(password) {
        errors.insert(Field::Password, e);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
