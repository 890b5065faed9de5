//! Scored events: the ephemeral output of one scoring pass.
//!
//! A [`ScoredEvent`] pairs an event with the signals that fired for it, the
//! resulting total score, and up to three human-readable reason strings. The
//! score is a deterministic, pure function of the scoring inputs; nothing
//! here is persisted.

use crate::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The independent signals a scoring pass can apply to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SignalKind {
    /// Event category is explicitly preferred.
    CategoryMatch,
    /// User has bought tickets in this category before.
    PurchaseAffinity,
    /// User has liked events in this category before.
    LikeAffinity,
    /// User follows the organizer.
    FollowedOrganizer,
    /// The event is running right now.
    HappeningNow,
    /// Venue city matches the user's home city.
    SameCity,
    /// Venue is within the user's travel radius.
    WithinRadius,
    /// Event starts within the next seven days.
    UpcomingSoon,
    /// Strong rating combined with strong ticket sales.
    Popular,
    /// Event starts on a Saturday or Sunday.
    Weekend,
    /// Price band matches the user's preference.
    PriceMatch,
    /// Mean rating of 4.0 or above.
    HighRating,
    /// Entry costs nothing.
    FreeEvent,
    /// Added to the catalogue within the last seven days.
    RecentlyAdded,
    /// Venue is beyond the user's travel radius (penalty).
    OutsideRadius,
}

impl SignalKind {
    /// Human-readable reason shown to the user when this signal fires.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CategoryMatch => "In a category you follow",
            Self::PurchaseAffinity => "Similar to events you've bought tickets for",
            Self::LikeAffinity => "Similar to events you've liked",
            Self::FollowedOrganizer => "From an organizer you follow",
            Self::HappeningNow => "Happening right now",
            Self::SameCity => "In your city",
            Self::WithinRadius => "Close to you",
            Self::UpcomingSoon => "Coming up this week",
            Self::Popular => "Selling fast",
            Self::Weekend => "On this weekend",
            Self::PriceMatch => "Matches your budget",
            Self::HighRating => "Highly rated",
            Self::FreeEvent => "Free entry",
            Self::RecentlyAdded => "Just added",
            Self::OutsideRadius => "Outside your travel range",
        }
    }
}

/// One applied signal and its score contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signal {
    /// Which signal fired.
    pub kind: SignalKind,
    /// Additive contribution to the total score. Negative for penalties.
    pub contribution: f32,
}

impl Signal {
    /// Construct a signal contribution.
    #[must_use]
    pub const fn new(kind: SignalKind, contribution: f32) -> Self {
        Self { kind, contribution }
    }
}

/// An event together with the outcome of one scoring pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredEvent {
    /// The scored event, untouched by the pass.
    pub event: Event,
    /// Sum of all signal contributions.
    pub score: f32,
    /// Signals that fired, in application order.
    pub signals: Vec<Signal>,
    /// Top contributing signal labels, descending by contribution, capped.
    pub reasons: Vec<String>,
}

impl ScoredEvent {
    /// Fold a set of applied signals into a scored event.
    ///
    /// The score is the plain sum of contributions. Reasons are drawn from
    /// signals whose contribution is at least `reason_visibility`, ordered by
    /// descending contribution (application order breaks ties), and capped at
    /// `reason_cap` entries.
    #[expect(
        clippy::float_arithmetic,
        reason = "the total score is the sum of signal contributions"
    )]
    #[must_use]
    pub fn from_signals(
        event: Event,
        signals: Vec<Signal>,
        reason_visibility: f32,
        reason_cap: usize,
    ) -> Self {
        let score = signals.iter().map(|signal| signal.contribution).sum();
        let mut visible: Vec<&Signal> = signals
            .iter()
            .filter(|signal| signal.contribution >= reason_visibility)
            .collect();
        visible.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        let reasons = visible
            .iter()
            .take(reason_cap)
            .map(|signal| signal.kind.label().to_owned())
            .collect();
        Self {
            event,
            score,
            signals,
            reasons,
        }
    }

    /// Whether `kind` fired during the scoring pass.
    #[must_use]
    pub fn has_signal(&self, kind: SignalKind) -> bool {
        self.signals.iter().any(|signal| signal.kind == kind)
    }
}
