//! SQLite-backed profile store.
//!
//! One row per user with the profile encoded as JSON. Every
//! `record_interaction` call runs as an immediate transaction wrapping a
//! read-modify-write, which gives the atomic-per-call guarantee the
//! [`ProfileStore`] contract requires.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use crate::{Category, Interaction, InterestProfile};

use super::{ProfileStore, ProfileStoreError};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS profiles (
        user_id INTEGER PRIMARY KEY,
        profile TEXT NOT NULL
    )";
const SELECT_SQL: &str = "SELECT profile FROM profiles WHERE user_id = ?1";
const UPSERT_SQL: &str = "INSERT INTO profiles (user_id, profile) VALUES (?1, ?2)
    ON CONFLICT(user_id) DO UPDATE SET profile = excluded.profile";

/// Profile store backed by a SQLite database.
pub struct SqliteProfileStore {
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProfileStore").finish_non_exhaustive()
    }
}

impl SqliteProfileStore {
    /// Open (and initialise) a store at `path`.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError::OpenDatabase`] when the database cannot
    /// be opened and [`ProfileStoreError::Query`] when the schema cannot be
    /// created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ProfileStoreError> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|source| {
            ProfileStoreError::OpenDatabase {
                path: PathBuf::from(path),
                source,
            }
        })?;
        Self::with_connection(connection)
    }

    /// Open a transient in-memory store, useful in tests.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError`] when SQLite cannot allocate the
    /// database or create the schema.
    pub fn in_memory() -> Result<Self, ProfileStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| ProfileStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, ProfileStoreError> {
        connection
            .execute(CREATE_TABLE_SQL, [])
            .map_err(|source| ProfileStoreError::Query {
                operation: "create profiles table",
                source,
            })?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn load_row(
        connection: &Connection,
        user_id: i64,
    ) -> Result<Option<String>, ProfileStoreError> {
        connection
            .query_row(SELECT_SQL, params![user_id], |row| row.get(0))
            .optional()
            .map_err(|source| ProfileStoreError::Query {
                operation: "read profile row",
                source,
            })
    }

    fn decode(user_id: u64, payload: Option<String>) -> Result<InterestProfile, ProfileStoreError> {
        payload.map_or_else(
            || Ok(InterestProfile::new()),
            |json| {
                serde_json::from_str(&json)
                    .map_err(|source| ProfileStoreError::Deserialise { user_id, source })
            },
        )
    }
}

impl ProfileStore for SqliteProfileStore {
    fn load(&self, user_id: u64) -> Result<InterestProfile, ProfileStoreError> {
        let row_id =
            i64::try_from(user_id).map_err(|_| ProfileStoreError::UserIdOutOfRange { user_id })?;
        let connection = self
            .connection
            .lock()
            .map_err(|_| ProfileStoreError::Poisoned)?;
        let payload = Self::load_row(&connection, row_id)?;
        Self::decode(user_id, payload)
    }

    fn record_interaction(
        &self,
        user_id: u64,
        category: Category,
        interaction: Interaction,
    ) -> Result<(), ProfileStoreError> {
        let row_id =
            i64::try_from(user_id).map_err(|_| ProfileStoreError::UserIdOutOfRange { user_id })?;
        let mut connection = self
            .connection
            .lock()
            .map_err(|_| ProfileStoreError::Poisoned)?;
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|source| ProfileStoreError::Query {
                operation: "begin interaction transaction",
                source,
            })?;

        let mut profile = Self::decode(user_id, Self::load_row(&tx, row_id)?)?;
        profile.record_interaction(category, interaction);
        let json = serde_json::to_string(&profile)
            .map_err(|source| ProfileStoreError::Serialise { user_id, source })?;

        tx.execute(UPSERT_SQL, params![row_id, json])
            .map_err(|source| ProfileStoreError::Query {
                operation: "write profile row",
                source,
            })?;
        tx.commit().map_err(|source| ProfileStoreError::Query {
            operation: "commit interaction transaction",
            source,
        })
    }
}
