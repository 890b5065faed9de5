//! Interest profiles: accumulated per-user preference signal.
//!
//! A profile combines explicit preferences (categories, city, price band,
//! followed organizers) with weights inferred from recorded interactions.
//! Interaction counters only grow; [`InterestProfile::reset`] is the one way
//! to shrink them.

use std::collections::{HashMap, HashSet};

use crate::{Category, PriceBand};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of interactions at which profile confidence saturates.
///
/// Ten keeps a single recorded interaction at confidence `0.1`, just enough
/// to clear the engine's cold-start cutoff.
pub const COLD_START_THRESHOLD: u32 = 10;

/// A single kind of user action recorded against a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Interaction {
    /// The user opened an event's detail page.
    View,
    /// The user liked or favourited an event.
    Like,
    /// The user shared an event.
    Share,
    /// The user bought a ticket.
    Purchase,
}

impl Interaction {
    /// Point value added to the inferred category weight per occurrence.
    #[must_use]
    pub const fn points(self) -> f32 {
        match self {
            Self::View => 1.0,
            Self::Like => 3.0,
            Self::Share => 2.0,
            Self::Purchase => 5.0,
        }
    }
}

/// Per-category interaction tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InteractionCounts {
    /// Detail-page views.
    pub views: u32,
    /// Likes and favourites.
    pub likes: u32,
    /// Shares.
    pub shares: u32,
    /// Ticket purchases.
    pub purchases: u32,
}

impl InteractionCounts {
    /// Total interactions across all kinds.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.views
            .saturating_add(self.likes)
            .saturating_add(self.shares)
            .saturating_add(self.purchases)
    }

    const fn bump(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::View => self.views = self.views.saturating_add(1),
            Interaction::Like => self.likes = self.likes.saturating_add(1),
            Interaction::Share => self.shares = self.shares.saturating_add(1),
            Interaction::Purchase => self.purchases = self.purchases.saturating_add(1),
        }
    }
}

/// Accumulated preference signal for one user.
///
/// # Examples
/// ```
/// use eventpass_core::{Category, Interaction, InterestProfile};
///
/// let mut profile = InterestProfile::new().with_preferred_category(Category::Music);
/// profile.record_interaction(Category::Music, Interaction::Purchase);
/// assert!(profile.prefers_category(Category::Music));
/// assert_eq!(profile.counts(Category::Music).purchases, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterestProfile {
    preferred_categories: HashSet<Category>,
    inferred_weights: HashMap<Category, f32>,
    preferred_price_band: Option<PriceBand>,
    preferred_city: Option<String>,
    max_travel_km: Option<f64>,
    followed_organizers: HashSet<u64>,
    interactions: HashMap<Category, InteractionCounts>,
}

impl InterestProfile {
    /// Construct an empty, cold-start profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicitly preferred category while returning `self`.
    #[must_use]
    pub fn with_preferred_category(mut self, category: Category) -> Self {
        self.preferred_categories.insert(category);
        self
    }

    /// Set the preferred price band while returning `self`.
    #[must_use]
    pub fn with_price_band(mut self, band: PriceBand) -> Self {
        self.preferred_price_band = Some(band);
        self
    }

    /// Set the home city while returning `self`.
    #[must_use]
    pub fn with_preferred_city(mut self, city: impl Into<String>) -> Self {
        self.preferred_city = Some(city.into());
        self
    }

    /// Set the travel radius in kilometres while returning `self`.
    #[must_use]
    pub fn with_max_travel_km(mut self, km: f64) -> Self {
        self.max_travel_km = Some(km);
        self
    }

    /// Follow an organizer while returning `self`.
    #[must_use]
    pub fn with_followed_organizer(mut self, organizer_id: u64) -> Self {
        self.followed_organizers.insert(organizer_id);
        self
    }

    /// Whether the user explicitly prefers `category`.
    #[must_use]
    pub fn prefers_category(&self, category: Category) -> bool {
        self.preferred_categories.contains(&category)
    }

    /// The user's preferred price band, if any.
    #[must_use]
    pub const fn price_band(&self) -> Option<PriceBand> {
        self.preferred_price_band
    }

    /// The user's home city, if any.
    #[must_use]
    pub fn preferred_city(&self) -> Option<&str> {
        self.preferred_city.as_deref()
    }

    /// Maximum distance the user will travel, in kilometres.
    #[must_use]
    pub const fn max_travel_km(&self) -> Option<f64> {
        self.max_travel_km
    }

    /// Whether the user follows `organizer_id`.
    #[must_use]
    pub fn follows(&self, organizer_id: u64) -> bool {
        self.followed_organizers.contains(&organizer_id)
    }

    /// Record one interaction, accumulating the inferred category weight.
    ///
    /// Repeated calls accumulate by design; the operation has no error
    /// conditions.
    #[expect(
        clippy::float_arithmetic,
        reason = "inferred weights accumulate interaction points"
    )]
    pub fn record_interaction(&mut self, category: Category, interaction: Interaction) {
        *self.inferred_weights.entry(category).or_insert(0.0) += interaction.points();
        self.interactions.entry(category).or_default().bump(interaction);
    }

    /// Interaction tallies for `category` (zero when never touched).
    #[must_use]
    pub fn counts(&self, category: Category) -> InteractionCounts {
        self.interactions.get(&category).copied().unwrap_or_default()
    }

    /// Accumulated inferred weight for `category` (zero when never touched).
    #[must_use]
    pub fn inferred_weight(&self, category: Category) -> f32 {
        self.inferred_weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Total interactions across every category and kind.
    #[must_use]
    pub fn total_interactions(&self) -> u32 {
        self.interactions
            .values()
            .fold(0, |acc, counts| acc.saturating_add(counts.total()))
    }

    /// Whether the profile has never recorded an interaction.
    #[must_use]
    pub fn is_new_user(&self) -> bool {
        self.total_interactions() == 0
    }

    /// Confidence in the inferred weights, in `0.0..=1.0`.
    ///
    /// A pure, saturating function of the total interaction count:
    /// `min(1, total / COLD_START_THRESHOLD)`.
    #[must_use]
    pub fn confidence(&self) -> f32 {
        self.confidence_with(COLD_START_THRESHOLD)
    }

    /// Confidence computed against a caller-supplied saturation threshold.
    ///
    /// Deployments that want a slower warm-up than [`COLD_START_THRESHOLD`]
    /// pass their own value; `threshold` must be at least one.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "confidence is a bounded ratio of small counts"
    )]
    #[must_use]
    pub fn confidence_with(&self, threshold: u32) -> f32 {
        (self.total_interactions() as f32 / threshold.max(1) as f32).min(1.0)
    }

    /// Purchase-derived points for `category`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "affinity points scale small interaction counts"
    )]
    #[must_use]
    pub fn purchase_points(&self, category: Category) -> f32 {
        self.counts(category).purchases as f32 * Interaction::Purchase.points()
    }

    /// Like-derived points for `category`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "affinity points scale small interaction counts"
    )]
    #[must_use]
    pub fn like_points(&self, category: Category) -> f32 {
        self.counts(category).likes as f32 * Interaction::Like.points()
    }

    /// Highest purchase-derived points across all categories.
    #[must_use]
    pub fn max_purchase_points(&self) -> f32 {
        self.interactions
            .keys()
            .map(|&category| self.purchase_points(category))
            .fold(0.0, f32::max)
    }

    /// Highest like-derived points across all categories.
    #[must_use]
    pub fn max_like_points(&self) -> f32 {
        self.interactions
            .keys()
            .map(|&category| self.like_points(category))
            .fold(0.0, f32::max)
    }

    /// Clear inferred weights and interaction counters.
    ///
    /// Explicit preferences (categories, city, price band, follows) survive a
    /// reset.
    pub fn reset(&mut self) {
        self.inferred_weights.clear();
        self.interactions.clear();
    }
}
