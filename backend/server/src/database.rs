//! # SQLite
//!
//! Local relational store for the one profile row.
//!
//! ## Schema
//! - Table `profile`: id (**integer**, primary key), username (**text**), email (**text**), phone (**text**)
//! - Created on startup if absent, never migrated
//!
//! ## Implementation
//!
//! - Single row, always keyed by [`PROFILE_ID`]
//! - Created lazily by the first write, afterwards only updated
//! - One connection behind a mutex, requests take turns
//! - Every call blocks (mutex, busy timeout of another process holding the file), handlers run
//!   them on the blocking pool
//! - Writes run in an immediate transaction and land as one `INSERT .. ON CONFLICT` statement,
//!   so two first writes racing each other both succeed instead of one tripping the primary key
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use shared::{PROFILE_ID, Profile, ProfileInput, WriteOutcome};
use tracing::{debug, error, info};

use crate::error::AppError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    email TEXT,
    phone TEXT
)";

const SELECT_PROFILE: &str = "SELECT id, username, email, phone FROM profile WHERE id = ?1";

const PROFILE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM profile WHERE id = ?1)";

const UPSERT_PROFILE: &str = "INSERT INTO profile (id, username, email, phone)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(id) DO UPDATE SET
        username = excluded.username,
        email = excluded.email,
        phone = excluded.phone";

pub struct ProfileStore {
    connection: Mutex<Connection>,
}

impl ProfileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let connection = Connection::open(path)?;
        info!("Connected to the SQLite database at {}", path.display());

        Ok(Self::with_connection(connection))
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        Ok(Self::with_connection(Connection::open_in_memory()?))
    }

    /// Table creation failure is logged and the store is returned anyway,
    /// every later query will surface the same error to its caller.
    pub fn with_connection(connection: Connection) -> Self {
        if let Err(e) = connection.execute(CREATE_TABLE, []) {
            error!("Failed to create profile table: {e}");
        }

        Self {
            connection: Mutex::new(connection),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.connection.lock().map_err(|_| AppError::StoragePoisoned)
    }

    pub fn read(&self) -> Result<Profile, AppError> {
        let connection = self.lock()?;

        let profile = connection
            .query_row(SELECT_PROFILE, params![PROFILE_ID], profile_from_row)
            .optional()?;

        Ok(profile.unwrap_or_else(Profile::empty))
    }

    pub fn upsert(&self, input: &ProfileInput) -> Result<WriteOutcome, AppError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists: bool = tx.query_row(PROFILE_EXISTS, params![PROFILE_ID], |row| row.get(0))?;

        tx.execute(
            UPSERT_PROFILE,
            params![PROFILE_ID, input.username, input.email, input.phone],
        )?;
        tx.commit()?;

        let outcome = if exists {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Created
        };
        debug!("{outcome}");

        Ok(outcome)
    }
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: Some(row.get(0)?),
        username: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        phone: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}
