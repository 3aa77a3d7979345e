use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::Field;

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\x{4e00}-\x{9fa5}]+$").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").unwrap());

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?([0-9]{1,4})?([0-9]{10})$").unwrap());

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 12;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Username must only contain English and Chinese characters")]
    UsernameCharacters,

    #[error("Username must be 3-12 characters long, Chinese characters count as two")]
    UsernameLength,

    #[error("Enter a valid email address")]
    Email,

    #[error("Enter a valid phone number")]
    Phone,
}

pub fn validate_field(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required);
    }

    match field {
        Field::Username => {
            if !USERNAME.is_match(value) {
                return Err(ValidationError::UsernameCharacters);
            }
            if !(USERNAME_MIN..=USERNAME_MAX).contains(&display_width(value)) {
                return Err(ValidationError::UsernameLength);
            }
        }
        Field::Email => {
            if !EMAIL.is_match(value) {
                return Err(ValidationError::Email);
            }
        }
        Field::Phone => {
            if !PHONE.is_match(value) {
                return Err(ValidationError::Phone);
            }
        }
    }

    Ok(())
}

/// Latin letters take one column, Chinese characters two.
fn display_width(value: &str) -> usize {
    value
        .chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum()
}
