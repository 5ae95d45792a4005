// Contact submission validation
// Checks run in field order; every failing field is reported once

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::submission::{ContactSubmission, Field};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$")
        .expect("email pattern is a valid regex")
});

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    /// Absent, empty, or still the placeholder label
    Empty,
    /// Present but malformed (email only)
    Invalid,
}

/// One entry of the `errors` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: FieldErrorKind,
}

impl FieldError {
    const fn new(field: Field, error: FieldErrorKind) -> Self {
        Self {
            field: field.key(),
            error,
        }
    }
}

/// Submission that passed validation; all fields present and non-placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Whole-value match: `$` does not accept a trailing newline, so `"a@b.com\n"` is invalid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate in order name, email, subject, message
pub fn validate(submission: &ContactSubmission) -> Result<ValidContact<'_>, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut values = [""; 4];

    for (slot, field) in values.iter_mut().zip(Field::ALL) {
        match filled(submission, field) {
            None => errors.push(FieldError::new(field, FieldErrorKind::Empty)),
            Some(value) if field == Field::Email && !is_valid_email(value) => {
                errors.push(FieldError::new(field, FieldErrorKind::Invalid));
            }
            Some(value) => *slot = value,
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let [name, email, subject, message] = values;
    Ok(ValidContact {
        name,
        email,
        subject,
        message,
    })
}

/// Field value unless absent, empty, or equal to its placeholder
fn filled(submission: &ContactSubmission, field: Field) -> Option<&str> {
    submission
        .get(field)
        .filter(|v| !v.is_empty() && *v != field.placeholder())
}
