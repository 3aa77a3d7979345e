//! # Shared
//!
//! Payloads exchanged between the profile store and the profile form.
//!
//! ## Routes
//! - `GET /api/profile`: [`Profile`] as JSON, `id` is `null` when nothing was saved yet
//! - `POST /api/profile`: [`ProfileInput`] as JSON, answered with the text of a [`WriteOutcome`]
//! - `GET /api/user`: [`Identity`] as JSON, `{}` when no identity was attached
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROFILE_ID: i64 = 1;

pub const PROFILE_ROUTE: &str = "/api/profile";
/// Served for `GET` only, other methods get 405.
pub const USER_ROUTE: &str = "/api/user";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl Profile {
    /// Record returned when the table is still empty.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileInput {
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl From<&Profile> for ProfileInput {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
}

const CREATED: &str = "Profile Created";
const UPDATED: &str = "Profile Updated";

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Created => f.write_str(CREATED),
            WriteOutcome::Updated => f.write_str(UPDATED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOutcome(pub String);

impl fmt::Display for UnknownOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown write outcome: {}", self.0)
    }
}

impl std::error::Error for UnknownOutcome {}

impl FromStr for WriteOutcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            CREATED => Ok(WriteOutcome::Created),
            UPDATED => Ok(WriteOutcome::Updated),
            other => Err(UnknownOutcome(other.to_string())),
        }
    }
}

/// Caller description attached by an external identity provider.
///
/// Kept opaque, the store only passes it through.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Identity(pub Map<String, Value>);

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
