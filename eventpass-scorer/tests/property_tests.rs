//! Property-based tests for the recommendation engine.
//!
//! These use `proptest` to assert invariants that must hold for all valid
//! scoring inputs, complementing the scenario tests.
//!
//! # Invariants tested
//!
//! - **Determinism:** identical inputs produce identical ranked output.
//! - **Monotonicity:** a purchase in a category never lowers the score of a
//!   future event in that category.
//! - **Eligibility:** cancelled and ended events never appear in output.
//! - **Reason bound:** no scored event carries more than three reasons.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use eventpass_core::{
    Category, Event, EventStatus, Interaction, InterestProfile, PriceRange, Rating, Venue,
};
use eventpass_scorer::RecommendationEngine;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
}

/// Proptest-friendly event description.
#[derive(Debug, Clone)]
struct EventSeed {
    id: u64,
    category_index: usize,
    start_offset_hours: i64,
    duration_hours: i64,
    price_cents: u32,
    rating_tenths: u8,
    capacity: u32,
    sold_percent: u8,
    cancelled: bool,
}

fn event_seed() -> impl Strategy<Value = EventSeed> {
    (
        0_u64..64,
        0_usize..Category::ALL.len(),
        -96_i64..240,
        1_i64..12,
        0_u32..30_000,
        0_u8..=50,
        0_u32..500,
        0_u8..=100,
        proptest::bool::weighted(0.15),
    )
        .prop_map(
            |(
                id,
                category_index,
                start_offset_hours,
                duration_hours,
                price_cents,
                rating_tenths,
                capacity,
                sold_percent,
                cancelled,
            )| EventSeed {
                id,
                category_index,
                start_offset_hours,
                duration_hours,
                price_cents,
                rating_tenths,
                capacity,
                sold_percent,
                cancelled,
            },
        )
}

/// Build events with ids overridden by position so generated duplicates
/// cannot collide.
fn build_events(seeds: &[EventSeed]) -> Vec<Event> {
    seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let mut event = build_event(seed);
            event.id = index as u64;
            event
        })
        .collect()
}

fn build_event(seed: &EventSeed) -> Event {
    let category = Category::ALL
        .get(seed.category_index)
        .copied()
        .unwrap_or(Category::Music);
    let start = base_time() + Duration::hours(seed.start_offset_hours);
    let sold = (seed.capacity * u32::from(seed.sold_percent)) / 100;
    let status = if seed.cancelled {
        EventStatus::Cancelled
    } else {
        EventStatus::Published
    };
    Event::new(
        seed.id,
        format!("Event {}", seed.id),
        category,
        start,
        start + Duration::hours(seed.duration_hours),
        Venue::new("Sky Hall", "12 High St", "Kampala"),
        seed.id % 7,
    )
    .expect("seed windows are always positive")
    .with_price(PriceRange::new(seed.price_cents, seed.price_cents).expect("flat price"))
    .with_rating(Rating {
        mean: f32::from(seed.rating_tenths) / 10.0,
        count: 25,
    })
    .with_tickets(seed.capacity, sold)
    .expect("sold never exceeds capacity")
    .with_status(status)
}

fn build_profile(interactions: &[(usize, u8)]) -> InterestProfile {
    let mut profile = InterestProfile::new();
    for &(category_index, kind) in interactions {
        let category = Category::ALL
            .get(category_index)
            .copied()
            .unwrap_or(Category::Music);
        let interaction = match kind % 4 {
            0 => Interaction::View,
            1 => Interaction::Like,
            2 => Interaction::Share,
            _ => Interaction::Purchase,
        };
        profile.record_interaction(category, interaction);
    }
    profile
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Two invocations over the same inputs return identical output,
    /// including order, scores, and reasons.
    #[test]
    fn scoring_is_deterministic(
        seeds in proptest::collection::vec(event_seed(), 0..24),
        interactions in proptest::collection::vec((0_usize..10, 0_u8..4), 0..30),
    ) {
        let events = build_events(&seeds);
        let profile = build_profile(&interactions);
        let engine = RecommendationEngine::with_defaults();

        let first = engine.score(&events, &profile, base_time(), None);
        let second = engine.score(&events, &profile, base_time(), None);

        prop_assert_eq!(first, second);
    }

    /// A purchase in a category never lowers the score of a future event in
    /// that category, all else equal.
    #[test]
    fn purchases_are_monotone_per_category(
        seeds in proptest::collection::vec(event_seed(), 1..16),
        interactions in proptest::collection::vec((0_usize..10, 0_u8..4), 0..20),
    ) {
        let events = build_events(&seeds);
        let mut profile = build_profile(&interactions);
        let engine = RecommendationEngine::with_defaults();

        let before = engine.score(&events, &profile, base_time(), None);
        profile.record_interaction(Category::Music, Interaction::Purchase);
        let after = engine.score(&events, &profile, base_time(), None);

        for scored_before in before
            .iter()
            .filter(|s| s.event.category == Category::Music)
        {
            let scored_after = after
                .iter()
                .find(|s| s.event.id == scored_before.event.id
                    && s.event.start == scored_before.event.start)
                .expect("eligible events survive rescoring");
            prop_assert!(scored_after.score >= scored_before.score);
        }
    }

    /// Cancelled and ended events never reach the output, and no event
    /// carries more than three reasons.
    #[test]
    fn output_respects_eligibility_and_reason_cap(
        seeds in proptest::collection::vec(event_seed(), 0..24),
    ) {
        let events = build_events(&seeds);
        let engine = RecommendationEngine::with_defaults();

        let ranked = engine.score(&events, &InterestProfile::new(), base_time(), None);

        for scored in &ranked {
            prop_assert!(scored.event.status != EventStatus::Cancelled);
            prop_assert!(!scored.event.has_ended(base_time()));
            prop_assert!(scored.reasons.len() <= 3);
        }
    }
}
