//! Relevance scoring for EventPass events.
//!
//! The crate provides the [`RecommendationEngine`], a synchronous,
//! side-effect-free scorer: given candidate events, a user's
//! [`InterestProfile`](eventpass_core::InterestProfile), the current time,
//! and an optional user location, it returns a ranked, explainable list of
//! [`ScoredEvent`](eventpass_core::ScoredEvent)s. Signal weights live in
//! [`SignalWeights`] so deployments can tune them as configuration.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use eventpass_core::{Category, Event, InterestProfile, Venue};
//! use eventpass_scorer::RecommendationEngine;
//!
//! let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
//! let gig = Event::new(
//!     1,
//!     "Jazz Night",
//!     Category::Music,
//!     now + chrono::Duration::days(2),
//!     now + chrono::Duration::days(2) + chrono::Duration::hours(3),
//!     Venue::new("Sky Hall", "12 High St", "Kampala"),
//!     7,
//! )
//! .unwrap();
//! let profile = InterestProfile::new().with_preferred_category(Category::Music);
//!
//! let ranked = RecommendationEngine::with_defaults().score(&[gig], &profile, now, None);
//! assert_eq!(ranked.len(), 1);
//! ```

#![forbid(unsafe_code)]

mod engine;
mod weights;

pub use engine::RecommendationEngine;
pub use weights::{SignalWeights, WeightsError};
