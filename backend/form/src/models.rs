use std::fmt;

use shared::Profile;

use crate::validation::ValidationError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3030";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Username, Field::Email, Field::Phone];

    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    pub fn get(self, profile: &Profile) -> &str {
        match self {
            Field::Username => &profile.username,
            Field::Email => &profile.email,
            Field::Phone => &profile.phone,
        }
    }

    pub fn set(self, profile: &mut Profile, value: String) {
        match self {
            Field::Username => profile.username = value,
            Field::Email => profile.email = value,
            Field::Phone => profile.phone = value,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    View,
    Editing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub phone: Option<ValidationError>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        match field {
            Field::Username => self.username,
            Field::Email => self.email,
            Field::Phone => self.phone,
        }
    }

    pub fn set(&mut self, field: Field, error: Option<ValidationError>) {
        match field {
            Field::Username => self.username = error,
            Field::Email => self.email = error,
            Field::Phone => self.phone = error,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|error| (field, error)))
    }
}
