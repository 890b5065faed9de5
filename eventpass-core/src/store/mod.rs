//! Data access traits for event catalogues and interest profiles.
//!
//! The engine itself performs no I/O; these traits are the seams a hosting
//! service implements. [`EventCatalog`] supplies scoring candidates and owns
//! eligibility filtering. [`ProfileStore`] persists one
//! [`InterestProfile`] per user and must record interactions atomically per
//! call, while profile reads may be eventually consistent: recommendations
//! are advisory, not transactional.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Category, Event, Interaction, InterestProfile};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteProfileStore;

/// Read-only supply of scoring candidates.
///
/// Implementers are responsible for eligibility: only published, non-expired
/// events should be returned. The engine skips anything else defensively but
/// does not treat it as an error.
pub trait EventCatalog {
    /// Return the candidate events for a scoring pass at `now`.
    fn published_events(&self, now: DateTime<Utc>) -> Box<dyn Iterator<Item = Event> + Send + '_>;
}

/// Errors raised by profile store implementations.
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    /// Opening the backing SQLite database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Requested database path.
        path: std::path::PathBuf,
        /// Source error from `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a database statement failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error from `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A user identifier could not be represented in the backing store.
    #[error("user id {user_id} is outside the supported range")]
    UserIdOutOfRange {
        /// Identifier supplied by the caller.
        user_id: u64,
    },
    /// Encoding a profile for storage failed.
    #[cfg(feature = "serde")]
    #[error("failed to serialise profile for user {user_id}")]
    Serialise {
        /// Affected user.
        user_id: u64,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Decoding a stored profile failed.
    #[cfg(feature = "serde")]
    #[error("failed to deserialise profile for user {user_id}")]
    Deserialise {
        /// Affected user.
        user_id: u64,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A shared in-memory store lock was poisoned.
    #[error("profile store lock poisoned")]
    Poisoned,
}

/// Persistence for per-user interest profiles.
///
/// A missing user is not an error: [`ProfileStore::load`] returns an empty
/// profile so the caller proceeds as a new user.
pub trait ProfileStore: Send + Sync {
    /// Load the profile for `user_id`, defaulting to empty when absent.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError`] when the backing store cannot be read
    /// or a stored profile cannot be decoded.
    fn load(&self, user_id: u64) -> Result<InterestProfile, ProfileStoreError>;

    /// Record one interaction for `user_id`.
    ///
    /// Must be atomic per call: concurrent calls for the same user must not
    /// lose updates.
    ///
    /// # Errors
    /// Returns [`ProfileStoreError`] when the update cannot be applied.
    fn record_interaction(
        &self,
        user_id: u64,
        category: Category,
        interaction: Interaction,
    ) -> Result<(), ProfileStoreError>;
}
