//! Deterministic relevance scoring over candidate events.
//!
//! One scoring pass walks the candidate list once, accumulates independent
//! additive signal contributions per event, and returns a ranked list of
//! [`ScoredEvent`]s. The pass is a pure function of
//! `(events, profile, now, user_location)`: the engine never reads the
//! system clock and holds no mutable state.

use chrono::{DateTime, Duration, Utc};
use geo::Coord;

use eventpass_core::{
    Event, EventStatus, InterestProfile, ScoredEvent, Signal, SignalKind, haversine_km,
};

use crate::{SignalWeights, WeightsError};

/// Mean rating at which the high-rating signal fires.
const HIGH_RATING_MEAN: f32 = 4.0;
/// Window for the upcoming-soon and recently-added signals.
const RECENCY_WINDOW_DAYS: i64 = 7;

/// Scores candidate events against a user's interest profile.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use eventpass_core::{Category, Event, InterestProfile, Venue};
/// use eventpass_scorer::RecommendationEngine;
///
/// let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
/// let event = Event::new(
///     1,
///     "Jazz Night",
///     Category::Music,
///     now + chrono::Duration::days(1),
///     now + chrono::Duration::days(1) + chrono::Duration::hours(3),
///     Venue::new("Sky Hall", "12 High St", "Kampala"),
///     7,
/// )
/// .unwrap();
/// let profile = InterestProfile::new().with_preferred_category(Category::Music);
///
/// let engine = RecommendationEngine::with_defaults();
/// let ranked = engine.score(&[event], &profile, now, None);
/// assert_eq!(ranked.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    weights: SignalWeights,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RecommendationEngine {
    /// Construct an engine with the default signal weights.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            weights: SignalWeights::default(),
        }
    }

    /// Construct an engine with custom weights.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the weights fail validation.
    pub fn new(weights: SignalWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// The weights this engine scores with.
    #[must_use]
    pub const fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    /// Score and rank `events` for one user.
    ///
    /// Cancelled and already-ended events are skipped, never errors. Output
    /// is ordered by score descending, then start ascending, then id
    /// ascending, so identical inputs always produce identical output.
    #[must_use]
    pub fn score(
        &self,
        events: &[Event],
        profile: &InterestProfile,
        now: DateTime<Utc>,
        user_location: Option<Coord<f64>>,
    ) -> Vec<ScoredEvent> {
        let cold_start = self.is_cold_start(profile);
        let mut ranked: Vec<ScoredEvent> = events
            .iter()
            .filter(|event| self.is_scorable(event, now))
            .map(|event| {
                let signals = self.signals_for(event, profile, now, user_location, cold_start);
                ScoredEvent::from_signals(
                    event.clone(),
                    signals,
                    self.weights.reason_visibility,
                    self.weights.reason_cap,
                )
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.event.start.cmp(&b.event.start))
                .then_with(|| a.event.id.cmp(&b.event.id))
        });

        if cold_start {
            ranked = spread_categories(ranked, self.weights.cold_start_category_cap);
        }
        ranked
    }

    fn is_cold_start(&self, profile: &InterestProfile) -> bool {
        profile.is_new_user()
            || profile.confidence_with(self.weights.cold_start_interaction_threshold)
                < self.weights.cold_start_confidence
    }

    #[expect(clippy::unused_self, reason = "kept as a method beside the other predicates")]
    fn is_scorable(&self, event: &Event, now: DateTime<Utc>) -> bool {
        if event.status == EventStatus::Cancelled {
            log::debug!("skipping event {}: cancelled", event.id);
            return false;
        }
        if event.has_ended(now) {
            log::debug!("skipping event {}: already ended", event.id);
            return false;
        }
        true
    }

    fn signals_for(
        &self,
        event: &Event,
        profile: &InterestProfile,
        now: DateTime<Utc>,
        user_location: Option<Coord<f64>>,
        cold_start: bool,
    ) -> Vec<Signal> {
        let mut signals = Vec::new();
        if !cold_start {
            self.affinity_signals(event, profile, &mut signals);
        }
        self.context_signals(event, profile, now, user_location, &mut signals);
        self.quality_signals(event, profile, now, &mut signals);
        signals
    }

    /// Signals derived from the user's preference history. Suppressed during
    /// cold start because they would amplify noise.
    #[expect(
        clippy::float_arithmetic,
        reason = "affinity contributions scale capped weights"
    )]
    fn affinity_signals(&self, event: &Event, profile: &InterestProfile, out: &mut Vec<Signal>) {
        if profile.prefers_category(event.category) {
            out.push(Signal::new(
                SignalKind::CategoryMatch,
                self.weights.category_match,
            ));
        }

        let purchase_points = profile.purchase_points(event.category);
        if purchase_points > 0.0 {
            let scaled =
                self.weights.purchase_affinity_cap * purchase_points / profile.max_purchase_points();
            out.push(Signal::new(SignalKind::PurchaseAffinity, scaled));
        }

        let like_points = profile.like_points(event.category);
        if like_points > 0.0 {
            let scaled = self.weights.like_affinity_cap * like_points / profile.max_like_points();
            out.push(Signal::new(SignalKind::LikeAffinity, scaled));
        }
    }

    /// Signals derived from where and when the event happens relative to the
    /// user.
    #[expect(
        clippy::float_arithmetic,
        reason = "the radius penalty negates a configured magnitude"
    )]
    fn context_signals(
        &self,
        event: &Event,
        profile: &InterestProfile,
        now: DateTime<Utc>,
        user_location: Option<Coord<f64>>,
        out: &mut Vec<Signal>,
    ) {
        if profile.follows(event.organizer_id) {
            out.push(Signal::new(
                SignalKind::FollowedOrganizer,
                self.weights.followed_organizer,
            ));
        }

        if event.is_ongoing(now) {
            out.push(Signal::new(
                SignalKind::HappeningNow,
                self.weights.happening_now,
            ));
        }

        if let Some(city) = profile.preferred_city()
            && city.eq_ignore_ascii_case(&event.venue.city)
        {
            out.push(Signal::new(SignalKind::SameCity, self.weights.same_city));
        }

        // Distance signals need all three of: the user's position, the
        // venue's position, and a configured radius. Without a user location
        // there is no penalty either.
        if let (Some(user), Some(venue), Some(max_km)) =
            (user_location, event.venue.location, profile.max_travel_km())
        {
            let distance_km = haversine_km(user, venue);
            if distance_km <= max_km {
                out.push(Signal::new(
                    SignalKind::WithinRadius,
                    self.weights.within_radius,
                ));
            } else {
                out.push(Signal::new(
                    SignalKind::OutsideRadius,
                    -self.weights.outside_radius_penalty,
                ));
            }
        }

        let lead = event.start - now;
        if lead > Duration::zero() && lead <= Duration::days(RECENCY_WINDOW_DAYS) {
            out.push(Signal::new(
                SignalKind::UpcomingSoon,
                self.weights.upcoming_week,
            ));
        }
    }

    /// Signals intrinsic to the event: popularity, timing, price, rating.
    #[expect(
        clippy::float_arithmetic,
        reason = "the popularity heuristic multiplies rating by sales ratio"
    )]
    fn quality_signals(
        &self,
        event: &Event,
        profile: &InterestProfile,
        now: DateTime<Utc>,
        out: &mut Vec<Signal>,
    ) {
        if event.rating.mean * event.tickets_sold_ratio() > self.weights.popularity_threshold {
            out.push(Signal::new(SignalKind::Popular, self.weights.popularity));
        }

        if event.starts_on_weekend() {
            out.push(Signal::new(SignalKind::Weekend, self.weights.weekend));
        }

        if profile.price_band() == Some(event.price.band()) {
            out.push(Signal::new(
                SignalKind::PriceMatch,
                self.weights.price_match,
            ));
        }

        if event.rating.mean >= HIGH_RATING_MEAN {
            out.push(Signal::new(
                SignalKind::HighRating,
                self.weights.high_rating,
            ));
        }

        if event.is_free() {
            out.push(Signal::new(SignalKind::FreeEvent, self.weights.free_event));
        }

        let age = now - event.created_at;
        if age >= Duration::zero() && age <= Duration::days(RECENCY_WINDOW_DAYS) {
            out.push(Signal::new(
                SignalKind::RecentlyAdded,
                self.weights.recently_added,
            ));
        }
    }
}

/// Reorder a ranked list so no category holds more than `cap` of the leading
/// positions. Overflow events keep their relative order and follow the
/// capped head.
fn spread_categories(ranked: Vec<ScoredEvent>, cap: usize) -> Vec<ScoredEvent> {
    if cap == 0 {
        return ranked;
    }
    let mut per_category: std::collections::HashMap<eventpass_core::Category, usize> =
        std::collections::HashMap::new();
    let mut head = Vec::with_capacity(ranked.len());
    let mut overflow = Vec::new();
    for scored in ranked {
        let seen = per_category.entry(scored.event.category).or_insert(0);
        if *seen < cap {
            *seen += 1;
            head.push(scored);
        } else {
            overflow.push(scored);
        }
    }
    head.extend(overflow);
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use eventpass_core::test_support::sample_event;
    use eventpass_core::{Category, Interaction};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    #[rstest]
    fn empty_input_yields_empty_output(now: DateTime<Utc>) {
        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(&[], &InterestProfile::new(), now, None);
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn skips_cancelled_and_ended_events(now: DateTime<Utc>) {
        let upcoming = sample_event(1, Category::Music, now + Duration::days(1));
        let cancelled = sample_event(2, Category::Music, now + Duration::days(1))
            .with_status(EventStatus::Cancelled);
        let ended = sample_event(3, Category::Music, now - Duration::days(1));

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(
            &[upcoming, cancelled, ended],
            &InterestProfile::new(),
            now,
            None,
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.first().map(|s| s.event.id), Some(1));
    }

    #[rstest]
    fn ties_break_by_start_then_id(now: DateTime<Utc>) {
        let later = sample_event(5, Category::Music, now + Duration::days(2));
        let sooner = sample_event(9, Category::Music, now + Duration::days(1));
        let sooner_lower_id = sample_event(4, Category::Music, now + Duration::days(1));

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(
            &[later, sooner, sooner_lower_id],
            &InterestProfile::new(),
            now,
            None,
        );

        let ids: Vec<u64> = ranked.iter().map(|s| s.event.id).collect();
        assert_eq!(ids, vec![4, 9, 5]);
    }

    #[rstest]
    fn purchase_affinity_scales_with_history(now: DateTime<Utc>) {
        let mut profile = InterestProfile::new();
        // Enough interactions to clear the cold-start cutoff.
        for _ in 0..3 {
            profile.record_interaction(Category::Music, Interaction::Purchase);
        }
        profile.record_interaction(Category::Sports, Interaction::Purchase);

        let music = sample_event(1, Category::Music, now + Duration::days(1));
        let sports = sample_event(2, Category::Sports, now + Duration::days(1));

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(&[music, sports], &profile, now, None);

        let music_scored = ranked
            .iter()
            .find(|s| s.event.category == Category::Music)
            .unwrap();
        let sports_scored = ranked
            .iter()
            .find(|s| s.event.category == Category::Sports)
            .unwrap();
        assert!(music_scored.score > sports_scored.score);
        assert!(music_scored.has_signal(SignalKind::PurchaseAffinity));
        // The dominant category receives the full cap.
        let purchase = music_scored
            .signals
            .iter()
            .find(|s| s.kind == SignalKind::PurchaseAffinity)
            .unwrap();
        assert!((purchase.contribution - 35.0).abs() < 1e-6);
    }

    #[rstest]
    fn no_location_means_no_radius_penalty(now: DateTime<Utc>) {
        let profile = InterestProfile::new().with_max_travel_km(5.0);
        let mut event = sample_event(1, Category::Arts, now + Duration::days(1));
        event.venue = event
            .venue
            .with_location(Coord { x: 32.58, y: 0.35 });

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(&[event], &profile, now, None);

        let scored = ranked.first().unwrap();
        assert!(!scored.has_signal(SignalKind::OutsideRadius));
        assert!(!scored.has_signal(SignalKind::WithinRadius));
    }

    #[rstest]
    fn distant_venue_is_penalised_when_location_known(now: DateTime<Utc>) {
        let profile = InterestProfile::new().with_max_travel_km(5.0);
        let mut event = sample_event(1, Category::Arts, now + Duration::days(1));
        // Roughly 170 km away from the user's position.
        event.venue = event.venue.with_location(Coord { x: 34.0, y: 1.0 });

        let engine = RecommendationEngine::with_defaults();
        let user = Coord { x: 32.58, y: 0.35 };
        let ranked = engine.score(&[event], &profile, now, Some(user));

        let scored = ranked.first().unwrap();
        assert!(scored.has_signal(SignalKind::OutsideRadius));
        assert!(!scored.has_signal(SignalKind::WithinRadius));
    }

    #[rstest]
    fn cold_start_suppresses_affinity_signals(now: DateTime<Utc>) {
        let profile = InterestProfile::new().with_preferred_category(Category::Music);
        let event = sample_event(1, Category::Music, now + Duration::days(1));

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(&[event], &profile, now, None);

        let scored = ranked.first().unwrap();
        assert!(!scored.has_signal(SignalKind::CategoryMatch));
    }

    #[rstest]
    fn slower_warmup_threshold_keeps_sparse_profiles_cold(now: DateTime<Utc>) {
        let mut profile = InterestProfile::new().with_preferred_category(Category::Music);
        profile.record_interaction(Category::Music, Interaction::Purchase);
        let event = sample_event(1, Category::Music, now + Duration::days(1));

        let default_engine = RecommendationEngine::with_defaults();
        let warm = default_engine.score(std::slice::from_ref(&event), &profile, now, None);
        assert!(warm.first().unwrap().has_signal(SignalKind::CategoryMatch));

        // One purchase is 0.05 confidence against a threshold of 20.
        let slow_engine = RecommendationEngine::new(SignalWeights {
            cold_start_interaction_threshold: 20,
            ..SignalWeights::default()
        })
        .unwrap();
        let cold = slow_engine.score(&[event], &profile, now, None);
        assert!(!cold.first().unwrap().has_signal(SignalKind::CategoryMatch));
    }

    #[rstest]
    fn cold_start_head_spans_categories(now: DateTime<Utc>) {
        let events: Vec<Event> = (0..6)
            .map(|i| {
                let category = if i < 4 { Category::Music } else { Category::Sports };
                sample_event(i, category, now + Duration::days(1))
            })
            .collect();

        let engine = RecommendationEngine::with_defaults();
        let ranked = engine.score(&events, &InterestProfile::new(), now, None);

        let head_categories: std::collections::HashSet<Category> = ranked
            .iter()
            .take(3)
            .map(|s| s.event.category)
            .collect();
        assert!(head_categories.len() >= 2);
    }

    #[rstest]
    fn spread_categories_respects_cap() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        let ranked: Vec<ScoredEvent> = (0..5)
            .map(|i| {
                ScoredEvent::from_signals(
                    sample_event(i, Category::Music, now + Duration::days(1)),
                    Vec::new(),
                    5.0,
                    3,
                )
            })
            .chain(std::iter::once(ScoredEvent::from_signals(
                sample_event(10, Category::Sports, now + Duration::days(1)),
                Vec::new(),
                5.0,
                3,
            )))
            .collect();

        let spread = spread_categories(ranked, 2);
        let head: Vec<Category> = spread.iter().take(3).map(|s| s.event.category).collect();
        assert_eq!(
            head,
            vec![Category::Music, Category::Music, Category::Sports]
        );
    }
}
