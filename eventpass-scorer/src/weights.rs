//! Tunable signal weights for the recommendation engine.
//!
//! The defaults encode the product's design intent; deployments tune them
//! through configuration rather than code. [`SignalWeights::validate`]
//! rejects weights the engine cannot score with deterministically.

use eventpass_core::COLD_START_THRESHOLD;
use thiserror::Error;

/// Errors raised when validating [`SignalWeights`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightsError {
    /// A weight was NaN or infinite.
    #[error("signal weight '{field}' must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A weight or threshold was negative.
    #[error("signal weight '{field}' must be non-negative")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The reason cap would suppress all explanations.
    #[error("reason cap must be at least 1")]
    InvalidReasonCap,
    /// The cold-start confidence cutoff fell outside `0.0..=1.0`.
    #[error("cold start confidence cutoff must lie in 0.0..=1.0")]
    InvalidConfidenceCutoff,
    /// The interaction threshold would make confidence undefined.
    #[error("cold start interaction threshold must be at least 1")]
    InvalidInteractionThreshold,
}

/// Additive contribution of each scoring signal, plus engine thresholds.
///
/// All contributions are stored as positive magnitudes; the engine negates
/// `outside_radius_penalty` when applying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    /// Event category is explicitly preferred.
    pub category_match: f32,
    /// Ceiling for the purchase-history affinity contribution.
    pub purchase_affinity_cap: f32,
    /// Ceiling for the like-history affinity contribution.
    pub like_affinity_cap: f32,
    /// Organizer is followed by the user.
    pub followed_organizer: f32,
    /// Event is running at scoring time.
    pub happening_now: f32,
    /// Venue city matches the user's home city.
    pub same_city: f32,
    /// Venue lies within the user's travel radius.
    pub within_radius: f32,
    /// Event starts within the next seven days.
    pub upcoming_week: f32,
    /// Rating and ticket sales clear the popularity threshold.
    pub popularity: f32,
    /// Event starts on a Saturday or Sunday.
    pub weekend: f32,
    /// Price band matches the user's preference.
    pub price_match: f32,
    /// Mean rating of 4.0 or above.
    pub high_rating: f32,
    /// Entry costs nothing.
    pub free_event: f32,
    /// Added to the catalogue within the last seven days.
    pub recently_added: f32,
    /// Penalty magnitude for venues beyond the travel radius.
    pub outside_radius_penalty: f32,
    /// `rating.mean x tickets_sold_ratio` must exceed this to count as
    /// popular.
    pub popularity_threshold: f32,
    /// Minimum contribution for a signal to surface as a reason string.
    pub reason_visibility: f32,
    /// Maximum number of reason strings per scored event.
    pub reason_cap: usize,
    /// Profiles below this confidence score with cold-start fallback.
    pub cold_start_confidence: f32,
    /// Interaction count at which profile confidence saturates.
    pub cold_start_interaction_threshold: u32,
    /// Maximum events per category at the head of a cold-start ranking.
    pub cold_start_category_cap: usize,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            category_match: 40.0,
            purchase_affinity_cap: 35.0,
            like_affinity_cap: 25.0,
            followed_organizer: 30.0,
            happening_now: 25.0,
            same_city: 20.0,
            within_radius: 15.0,
            upcoming_week: 15.0,
            popularity: 10.0,
            weekend: 10.0,
            price_match: 8.0,
            high_rating: 5.0,
            free_event: 5.0,
            recently_added: 5.0,
            outside_radius_penalty: 10.0,
            popularity_threshold: 2.0,
            reason_visibility: 5.0,
            reason_cap: 3,
            cold_start_confidence: 0.1,
            cold_start_interaction_threshold: COLD_START_THRESHOLD,
            cold_start_category_cap: 2,
        }
    }
}

impl SignalWeights {
    /// Validate the weights and return them unchanged.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when any contribution or threshold is
    /// non-finite or negative, the reason cap is zero, or the cold-start
    /// cutoff falls outside `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, WeightsError> {
        for (field, value) in self.named_fields() {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(WeightsError::Negative { field });
            }
        }
        if self.reason_cap == 0 {
            return Err(WeightsError::InvalidReasonCap);
        }
        if !(0.0..=1.0).contains(&self.cold_start_confidence) {
            return Err(WeightsError::InvalidConfidenceCutoff);
        }
        if self.cold_start_interaction_threshold == 0 {
            return Err(WeightsError::InvalidInteractionThreshold);
        }
        Ok(self)
    }

    fn named_fields(self) -> [(&'static str, f32); 17] {
        [
            ("category_match", self.category_match),
            ("purchase_affinity_cap", self.purchase_affinity_cap),
            ("like_affinity_cap", self.like_affinity_cap),
            ("followed_organizer", self.followed_organizer),
            ("happening_now", self.happening_now),
            ("same_city", self.same_city),
            ("within_radius", self.within_radius),
            ("upcoming_week", self.upcoming_week),
            ("popularity", self.popularity),
            ("weekend", self.weekend),
            ("price_match", self.price_match),
            ("high_rating", self.high_rating),
            ("free_event", self.free_event),
            ("recently_added", self.recently_added),
            ("outside_radius_penalty", self.outside_radius_penalty),
            ("popularity_threshold", self.popularity_threshold),
            ("reason_visibility", self.reason_visibility),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(SignalWeights::default().validate().is_ok());
    }

    #[rstest]
    fn rejects_nan_weight() {
        let weights = SignalWeights {
            happening_now: f32::NAN,
            ..SignalWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::NonFinite {
                field: "happening_now"
            })
        );
    }

    #[rstest]
    fn rejects_negative_weight() {
        let weights = SignalWeights {
            category_match: -1.0,
            ..SignalWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::Negative {
                field: "category_match"
            })
        );
    }

    #[rstest]
    fn rejects_zero_reason_cap() {
        let weights = SignalWeights {
            reason_cap: 0,
            ..SignalWeights::default()
        };
        assert_eq!(weights.validate(), Err(WeightsError::InvalidReasonCap));
    }

    #[rstest]
    fn rejects_zero_interaction_threshold() {
        let weights = SignalWeights {
            cold_start_interaction_threshold: 0,
            ..SignalWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::InvalidInteractionThreshold)
        );
    }

    #[rstest]
    fn rejects_out_of_range_confidence_cutoff() {
        let weights = SignalWeights {
            cold_start_confidence: 1.5,
            ..SignalWeights::default()
        };
        assert_eq!(
            weights.validate(),
            Err(WeightsError::InvalidConfidenceCutoff)
        );
    }
}
