//! Discovery feed assembly for EventPass.
//!
//! The [`DiscoveryFeedBuilder`] turns one ranked scoring pass into named feed
//! sections ("Happening Now", "Recommended for You", ...). Sections appear in
//! a fixed priority order, each event lands in at most one section, every
//! section is capped, and empty sections are omitted. The builder is pure:
//! it cannot fail, and identical inputs produce identical sections.
//!
//! # Examples
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use eventpass_core::{Category, Event, ScoredEvent, Signal, SignalKind, Venue};
//! use eventpass_feed::DiscoveryFeedBuilder;
//!
//! let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
//! let gig = Event::new(
//!     1,
//!     "Jazz Night",
//!     Category::Music,
//!     now - Duration::hours(1),
//!     now + Duration::hours(2),
//!     Venue::new("Sky Hall", "12 High St", "Kampala"),
//!     7,
//! )
//! .unwrap();
//! let scored = ScoredEvent::from_signals(
//!     gig,
//!     vec![Signal::new(SignalKind::HappeningNow, 25.0)],
//!     5.0,
//!     3,
//! );
//!
//! let sections = DiscoveryFeedBuilder::with_defaults().build_sections(&[scored], now, 1.0);
//! assert_eq!(sections.first().map(|s| s.title.as_str()), Some("Happening Now"));
//! ```

#![forbid(unsafe_code)]

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use eventpass_core::{Category, ScoredEvent, SignalKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable limits for feed assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedConfig {
    /// Maximum events per section.
    pub section_cap: usize,
    /// Length of the "Recommended for You" section.
    pub recommended_len: usize,
    /// Profile confidence below which recommendations are diversified.
    pub cold_start_confidence: f32,
    /// Maximum recommended events per category during cold start.
    pub cold_start_category_cap: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            section_cap: 10,
            recommended_len: 10,
            cold_start_confidence: 0.1,
            cold_start_category_cap: 2,
        }
    }
}

/// The named sections a feed can contain, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SectionKind {
    /// Events running at the feed's reference time.
    HappeningNow,
    /// Top-ranked events, diversified during cold start.
    RecommendedForYou,
    /// Events that matched the user's categories or interaction history.
    BasedOnYourInterests,
    /// Events within the user's travel radius.
    NearYou,
    /// Events with strong ratings and strong ticket sales.
    PopularRightNow,
    /// Events starting on the current or upcoming weekend.
    ThisWeekend,
    /// Events with free entry.
    FreeEvents,
}

impl SectionKind {
    /// Every section in feed priority order.
    pub const ORDER: [Self; 7] = [
        Self::HappeningNow,
        Self::RecommendedForYou,
        Self::BasedOnYourInterests,
        Self::NearYou,
        Self::PopularRightNow,
        Self::ThisWeekend,
        Self::FreeEvents,
    ];

    /// Display title for the section.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HappeningNow => "Happening Now",
            Self::RecommendedForYou => "Recommended for You",
            Self::BasedOnYourInterests => "Based on Your Interests",
            Self::NearYou => "Near You",
            Self::PopularRightNow => "Popular Right Now",
            Self::ThisWeekend => "This Weekend",
            Self::FreeEvents => "Free Events",
        }
    }
}

/// One named, ordered slice of the discovery feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedSection {
    /// Display title, from [`SectionKind::title`].
    pub title: String,
    /// Events in this section, in ranked order.
    pub events: Vec<ScoredEvent>,
}

/// Assembles ranked scoring output into named feed sections.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFeedBuilder {
    config: FeedConfig,
}

impl DiscoveryFeedBuilder {
    /// Construct a builder with the given limits.
    #[must_use]
    pub const fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Construct a builder with the default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The builder's limits.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Assemble feed sections from one ranked scoring pass.
    ///
    /// `scored` must already be in ranked order; section membership preserves
    /// it. Each event appears in at most one section (earlier sections claim
    /// events first), sections are capped, and empty sections are omitted.
    /// `profile_confidence` below [`FeedConfig::cold_start_confidence`]
    /// diversifies the recommended section to at most
    /// [`FeedConfig::cold_start_category_cap`] events per category.
    #[must_use]
    pub fn build_sections(
        &self,
        scored: &[ScoredEvent],
        now: DateTime<Utc>,
        profile_confidence: f32,
    ) -> Vec<FeedSection> {
        let weekend = weekend_window(now);
        let mut placed: HashSet<u64> = HashSet::new();
        let mut sections = Vec::new();
        for kind in SectionKind::ORDER {
            let events = match kind {
                SectionKind::RecommendedForYou => {
                    self.recommended(scored, profile_confidence, &placed)
                }
                _ => self.matching(kind, scored, now, weekend, &placed),
            };
            if events.is_empty() {
                continue;
            }
            placed.extend(events.iter().map(|s| s.event.id));
            sections.push(FeedSection {
                title: kind.title().to_owned(),
                events,
            });
        }
        sections
    }

    /// Top-ranked events, spread across categories during cold start.
    fn recommended(
        &self,
        scored: &[ScoredEvent],
        profile_confidence: f32,
        placed: &HashSet<u64>,
    ) -> Vec<ScoredEvent> {
        let len = self.config.recommended_len.min(self.config.section_cap);
        let cold_start = profile_confidence < self.config.cold_start_confidence;
        let mut per_category: HashMap<Category, usize> = HashMap::new();
        let mut events = Vec::new();
        for candidate in scored {
            if events.len() >= len {
                break;
            }
            if placed.contains(&candidate.event.id) {
                continue;
            }
            if cold_start {
                let count = per_category.entry(candidate.event.category).or_insert(0);
                if *count >= self.config.cold_start_category_cap {
                    continue;
                }
                *count += 1;
            }
            events.push(candidate.clone());
        }
        events
    }

    fn matching(
        &self,
        kind: SectionKind,
        scored: &[ScoredEvent],
        now: DateTime<Utc>,
        weekend: (DateTime<Utc>, DateTime<Utc>),
        placed: &HashSet<u64>,
    ) -> Vec<ScoredEvent> {
        scored
            .iter()
            .filter(|candidate| !placed.contains(&candidate.event.id))
            .filter(|candidate| section_predicate(kind, candidate, now, weekend))
            .take(self.config.section_cap)
            .cloned()
            .collect()
    }
}

fn section_predicate(
    kind: SectionKind,
    candidate: &ScoredEvent,
    now: DateTime<Utc>,
    weekend: (DateTime<Utc>, DateTime<Utc>),
) -> bool {
    match kind {
        SectionKind::HappeningNow => candidate.event.is_ongoing(now),
        SectionKind::BasedOnYourInterests => {
            candidate.has_signal(SignalKind::CategoryMatch)
                || candidate.has_signal(SignalKind::PurchaseAffinity)
                || candidate.has_signal(SignalKind::LikeAffinity)
        }
        SectionKind::NearYou => candidate.has_signal(SignalKind::WithinRadius),
        SectionKind::PopularRightNow => candidate.has_signal(SignalKind::Popular),
        SectionKind::ThisWeekend => {
            let (from, until) = weekend;
            candidate.event.start >= from && candidate.event.start < until
        }
        SectionKind::FreeEvents => candidate.event.is_free(),
        SectionKind::RecommendedForYou => false,
    }
}

/// The current-or-upcoming weekend as a half-open UTC window.
///
/// Saturday 00:00 through Monday 00:00. On a Sunday the window covers the
/// weekend already underway rather than the next one.
fn weekend_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let days_to_saturday = 5 - i64::from(now.weekday().num_days_from_monday());
    let saturday = (now.date_naive() + Duration::days(days_to_saturday))
        .and_time(NaiveTime::MIN)
        .and_utc();
    (saturday, saturday + Duration::days(2))
}
