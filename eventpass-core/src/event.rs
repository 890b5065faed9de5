//! Events: schedulable, ticketed happenings and their lifecycle.
//!
//! Constructors validate the temporal and ticketing invariants so downstream
//! components can rely on well-formed values. The scoring engine treats
//! events as read-only input; the only mutations are status transitions and
//! rating updates.

use chrono::{DateTime, Datelike, Utc, Weekday};
use geo::Coord;
use thiserror::Error;

use crate::Category;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where an event takes place.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// location is optional: venues announced without a pin keep city-level
/// matching but are excluded from distance-based signals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Venue {
    /// Venue display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City used for same-city matching.
    pub city: String,
    /// Geospatial position, when known.
    pub location: Option<Coord<f64>>,
}

impl Venue {
    /// Construct a venue without a coordinate.
    ///
    /// # Examples
    /// ```
    /// use eventpass_core::Venue;
    ///
    /// let venue = Venue::new("Sky Hall", "12 High St", "Kampala");
    /// assert!(venue.location.is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            location: None,
        }
    }

    /// Attach a coordinate while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }
}

/// Aggregate attendee rating.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rating {
    /// Mean rating over all submissions, in `0.0..=5.0`.
    pub mean: f32,
    /// Number of submissions backing the mean.
    pub count: u32,
}

/// Ticket price range in integer minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceRange {
    /// Cheapest ticket price in cents.
    pub min_cents: u32,
    /// Most expensive ticket price in cents.
    pub max_cents: u32,
}

impl PriceRange {
    /// Validate and construct a price range.
    ///
    /// # Errors
    /// Returns [`EventError::InvalidPriceRange`] when `min_cents` exceeds
    /// `max_cents`.
    pub const fn new(min_cents: u32, max_cents: u32) -> Result<Self, EventError> {
        if min_cents > max_cents {
            return Err(EventError::InvalidPriceRange {
                min_cents,
                max_cents,
            });
        }
        Ok(Self {
            min_cents,
            max_cents,
        })
    }

    /// A zero-cost range for free events.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            min_cents: 0,
            max_cents: 0,
        }
    }

    /// Midpoint of the range in cents.
    #[must_use]
    pub const fn midpoint_cents(self) -> u32 {
        u32::midpoint(self.min_cents, self.max_cents)
    }

    /// The price band this range falls into, derived from the midpoint.
    #[must_use]
    pub const fn band(self) -> PriceBand {
        PriceBand::from_cents(self.midpoint_cents())
    }
}

/// Coarse price bands used for preference matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriceBand {
    /// No charge.
    Free,
    /// Under 25.00.
    Budget,
    /// 25.00 to 99.99.
    Standard,
    /// 100.00 and above.
    Premium,
}

impl PriceBand {
    /// Classify a price in cents.
    ///
    /// # Examples
    /// ```
    /// use eventpass_core::PriceBand;
    ///
    /// assert_eq!(PriceBand::from_cents(0), PriceBand::Free);
    /// assert_eq!(PriceBand::from_cents(1_500), PriceBand::Budget);
    /// assert_eq!(PriceBand::from_cents(120_00), PriceBand::Premium);
    /// ```
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        match cents {
            0 => Self::Free,
            1..2_500 => Self::Budget,
            2_500..10_000 => Self::Standard,
            _ => Self::Premium,
        }
    }
}

/// Lifecycle state of an event.
///
/// Transitions are monotonic: `Draft → Published → Ongoing → Completed`,
/// with `Cancelled` reachable from any pre-`Completed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventStatus {
    /// Being prepared by the organizer; invisible to discovery.
    Draft,
    /// Announced and selling tickets.
    Published,
    /// Currently running.
    Ongoing,
    /// Finished.
    Completed,
    /// Called off before completion.
    Cancelled,
}

impl EventStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Published)
                | (Self::Published, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (
                    Self::Draft | Self::Published | Self::Ongoing,
                    Self::Cancelled
                )
        )
    }
}

/// Errors returned by [`Event`] constructors and transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The end timestamp did not come after the start timestamp.
    #[error("event must end after it starts")]
    EndBeforeStart,
    /// More tickets were sold than the venue holds.
    #[error("tickets sold ({sold}) exceeds capacity ({capacity})")]
    OversoldTickets {
        /// Number of tickets sold.
        sold: u32,
        /// Venue capacity.
        capacity: u32,
    },
    /// The minimum price exceeded the maximum price.
    #[error("price range minimum {min_cents} exceeds maximum {max_cents}")]
    InvalidPriceRange {
        /// Cheapest ticket price in cents.
        min_cents: u32,
        /// Most expensive ticket price in cents.
        max_cents: u32,
    },
    /// A status change violated the monotonic lifecycle.
    #[error("cannot transition event from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current status.
        from: EventStatus,
        /// Requested status.
        to: EventStatus,
    },
}

/// A schedulable, ticketed happening.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use eventpass_core::{Category, Event, Venue};
///
/// # fn main() -> Result<(), eventpass_core::EventError> {
/// let event = Event::new(
///     1,
///     "Jazz Night",
///     Category::Music,
///     Utc.with_ymd_and_hms(2026, 9, 4, 19, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 9, 4, 23, 0, 0).unwrap(),
///     Venue::new("Sky Hall", "12 High St", "Kampala"),
///     7,
/// )?;
/// assert_eq!(event.id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Unique identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Fixed category.
    pub category: Category,
    /// When the event begins.
    pub start: DateTime<Utc>,
    /// When the event ends. Always after `start`.
    pub end: DateTime<Utc>,
    /// Where the event takes place.
    pub venue: Venue,
    /// Ticket price range.
    pub price: PriceRange,
    /// Aggregate attendee rating.
    pub rating: Rating,
    /// When the event was first published to the catalogue.
    pub created_at: DateTime<Utc>,
    /// Identifier of the organizing account.
    pub organizer_id: u64,
    /// Total tickets available.
    pub ticket_capacity: u32,
    /// Tickets sold so far. Never exceeds `ticket_capacity`.
    pub tickets_sold: u32,
    /// Lifecycle state.
    pub status: EventStatus,
}

impl Event {
    /// Validate and construct a published event with default price, rating,
    /// and ticketing. `created_at` defaults to `start`; chain
    /// [`Event::with_created_at`] to override.
    ///
    /// # Errors
    /// Returns [`EventError::EndBeforeStart`] when `end <= start`.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        category: Category,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        venue: Venue,
        organizer_id: u64,
    ) -> Result<Self, EventError> {
        if end <= start {
            return Err(EventError::EndBeforeStart);
        }
        Ok(Self {
            id,
            title: title.into(),
            category,
            start,
            end,
            venue,
            price: PriceRange::free(),
            rating: Rating::default(),
            created_at: start,
            organizer_id,
            ticket_capacity: 0,
            tickets_sold: 0,
            status: EventStatus::Published,
        })
    }

    /// Set the price range while returning `self` for chaining.
    #[must_use]
    pub fn with_price(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    /// Set the aggregate rating while returning `self` for chaining.
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    /// Set the catalogue timestamp while returning `self` for chaining.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the lifecycle state while returning `self` for chaining.
    ///
    /// Intended for catalogue loaders and fixtures; live state changes go
    /// through [`Event::transition`].
    #[must_use]
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Set ticketing figures.
    ///
    /// # Errors
    /// Returns [`EventError::OversoldTickets`] when `sold > capacity`.
    pub fn with_tickets(mut self, capacity: u32, sold: u32) -> Result<Self, EventError> {
        if sold > capacity {
            return Err(EventError::OversoldTickets { sold, capacity });
        }
        self.ticket_capacity = capacity;
        self.tickets_sold = sold;
        Ok(self)
    }

    /// Move the event to the next lifecycle state.
    ///
    /// # Errors
    /// Returns [`EventError::InvalidTransition`] when the change would
    /// violate the monotonic lifecycle.
    pub fn transition(&mut self, next: EventStatus) -> Result<(), EventError> {
        if !self.status.can_transition_to(next) {
            return Err(EventError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Fold a new rating submission into the running mean.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "running mean over bounded rating counts"
    )]
    pub fn apply_rating(&mut self, value: f32) {
        let clamped = value.clamp(0.0, 5.0);
        let total = self.rating.mean * self.rating.count as f32 + clamped;
        self.rating.count = self.rating.count.saturating_add(1);
        self.rating.mean = total / self.rating.count as f32;
    }

    /// Ticket sales are open iff the event is published and has not started.
    #[must_use]
    pub fn sales_open(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Published && now < self.start
    }

    /// Whether `now` falls within the event's scheduled window.
    #[must_use]
    pub fn is_ongoing(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// Whether the event's scheduled window has passed.
    #[must_use]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now > self.end
    }

    /// Fraction of the venue sold out, in `0.0..=1.0`.
    ///
    /// Zero-capacity events report `0.0`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "ratio of bounded ticket counts"
    )]
    #[must_use]
    pub fn tickets_sold_ratio(&self) -> f32 {
        if self.ticket_capacity == 0 {
            return 0.0;
        }
        (self.tickets_sold as f32 / self.ticket_capacity as f32).clamp(0.0, 1.0)
    }

    /// Whether entry costs nothing.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.price.max_cents == 0
    }

    /// Whether the event starts on a Saturday or Sunday (UTC).
    #[must_use]
    pub fn starts_on_weekend(&self) -> bool {
        matches!(self.start.weekday(), Weekday::Sat | Weekday::Sun)
    }
}
