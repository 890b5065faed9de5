//! Facade crate for the EventPass recommendation engine.
//!
//! This crate re-exports the core domain types together with the scoring
//! engine and the discovery feed builder so hosting services can depend on a
//! single package. Optional persistence lives behind feature flags.

#![forbid(unsafe_code)]

pub use eventpass_core::{
    Category, Event, EventCatalog, EventError, EventStatus, Interaction, InteractionCounts,
    InterestProfile, PriceBand, PriceRange, ProfileStore, ProfileStoreError, Rating, ScoredEvent,
    Signal, SignalKind, Venue,
};

#[cfg(feature = "store-sqlite")]
pub use eventpass_core::SqliteProfileStore;

pub use eventpass_feed::{DiscoveryFeedBuilder, FeedConfig, FeedSection, SectionKind};
pub use eventpass_scorer::{RecommendationEngine, SignalWeights, WeightsError};
