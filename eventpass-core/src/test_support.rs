//! Test-only, in-memory store implementations and event fixtures used by
//! unit and behaviour tests.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use chrono::{DateTime, Duration, Utc};

use crate::{
    Category, Event, EventCatalog, Interaction, InterestProfile, ProfileStore, ProfileStoreError,
    Venue,
};

/// Build a published two-hour event with neutral pricing and rating.
///
/// # Panics
/// Panics when `start` cannot anchor a two-hour window, which cannot happen
/// for the fixture inputs tests supply.
#[must_use]
pub fn sample_event(id: u64, category: Category, start: DateTime<Utc>) -> Event {
    Event::new(
        id,
        format!("Event {id}"),
        category,
        start,
        start + Duration::hours(2),
        Venue::new("Sky Hall", "12 High St", "Kampala"),
        100 + id,
    )
    .unwrap_or_else(|_| panic!("fixture event {id} must be valid"))
}

/// In-memory [`EventCatalog`] performing a linear scan.
///
/// Intended only for small test datasets.
#[derive(Default, Debug)]
pub struct MemoryCatalog {
    events: Vec<Event>,
}

impl MemoryCatalog {
    /// Create a catalog containing a single event.
    #[must_use]
    pub fn with_event(event: Event) -> Self {
        Self::with_events(std::iter::once(event))
    }

    /// Create a catalog from a collection of events.
    pub fn with_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventCatalog for MemoryCatalog {
    fn published_events(&self, now: DateTime<Utc>) -> Box<dyn Iterator<Item = Event> + Send + '_> {
        Box::new(
            self.events
                .iter()
                .filter(move |event| !event.has_ended(now))
                .cloned(),
        )
    }
}

/// Mutex-guarded in-memory [`ProfileStore`].
///
/// The single lock makes every `record_interaction` call atomic, matching
/// the store contract without persistence.
#[derive(Default, Debug)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<u64, InterestProfile>>,
}

impl MemoryProfileStore {
    /// Create a store seeded with one user's profile.
    #[must_use]
    pub fn with_profile(user_id: u64, profile: InterestProfile) -> Self {
        let store = Self::default();
        if let Ok(mut profiles) = store.profiles.lock() {
            profiles.insert(user_id, profile);
        }
        store
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, user_id: u64) -> Result<InterestProfile, ProfileStoreError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| ProfileStoreError::Poisoned)?;
        Ok(profiles.get(&user_id).cloned().unwrap_or_default())
    }

    fn record_interaction(
        &self,
        user_id: u64,
        category: Category,
        interaction: Interaction,
    ) -> Result<(), ProfileStoreError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| ProfileStoreError::Poisoned)?;
        profiles
            .entry(user_id)
            .or_default()
            .record_interaction(category, interaction);
        Ok(())
    }
}
