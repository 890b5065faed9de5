//! Categories describing the fixed set of event types.
//!
//! The enum offers compile-time safety for preference lookups.
//!
//! # Examples
//! ```
//! use eventpass_core::Category;
//!
//! assert_eq!(Category::Music.as_str(), "music");
//! assert_eq!(Category::Sports.to_string(), "sports");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broad category assigned to every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    /// Concerts, gigs, and festivals.
    Music,
    /// Matches, races, and tournaments.
    Sports,
    /// Exhibitions, theatre, and galleries.
    Arts,
    /// Tastings, markets, and pop-up dining.
    FoodAndDrink,
    /// Conferences and networking.
    Business,
    /// Meet-ups, hackathons, and launches.
    Technology,
    /// Workshops, lectures, and courses.
    Education,
    /// Club nights and late events.
    Nightlife,
    /// Neighbourhood and charity gatherings.
    Community,
    /// Fitness, mindfulness, and retreats.
    Wellness,
}

impl Category {
    /// Every category, in declaration order.
    ///
    /// Used by diversity logic that needs to iterate the whole set.
    pub const ALL: [Self; 10] = [
        Self::Music,
        Self::Sports,
        Self::Arts,
        Self::FoodAndDrink,
        Self::Business,
        Self::Technology,
        Self::Education,
        Self::Nightlife,
        Self::Community,
        Self::Wellness,
    ];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use eventpass_core::Category;
    ///
    /// assert_eq!(Category::FoodAndDrink.as_str(), "food_and_drink");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Sports => "sports",
            Self::Arts => "arts",
            Self::FoodAndDrink => "food_and_drink",
            Self::Business => "business",
            Self::Technology => "technology",
            Self::Education => "education",
            Self::Nightlife => "nightlife",
            Self::Community => "community",
            Self::Wellness => "wellness",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "music" => Ok(Self::Music),
            "sports" => Ok(Self::Sports),
            "arts" => Ok(Self::Arts),
            "food_and_drink" => Ok(Self::FoodAndDrink),
            "business" => Ok(Self::Business),
            "technology" => Ok(Self::Technology),
            "education" => Ok(Self::Education),
            "nightlife" => Ok(Self::Nightlife),
            "community" => Ok(Self::Community),
            "wellness" => Ok(Self::Wellness),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}
