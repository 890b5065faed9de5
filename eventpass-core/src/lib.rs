//! Core domain types for the EventPass recommendation engine.
//!
//! The crate models events, per-user interest profiles, and the scored
//! output of a recommendation pass, together with the data-access seams a
//! hosting service implements. Constructors return `Result` to surface
//! invalid input early; the scoring engine in `eventpass-scorer` consumes
//! these types read-only.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod category;
mod distance;
mod event;
mod profile;
mod scored;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::Category;
pub use distance::haversine_km;
pub use event::{Event, EventError, EventStatus, PriceBand, PriceRange, Rating, Venue};
pub use profile::{COLD_START_THRESHOLD, Interaction, InteractionCounts, InterestProfile};
pub use scored::{ScoredEvent, Signal, SignalKind};
pub use store::{EventCatalog, ProfileStore, ProfileStoreError};

#[cfg(feature = "store-sqlite")]
pub use store::SqliteProfileStore;
