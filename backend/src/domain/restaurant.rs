//! Restaurant data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Allergen;

/// Stable restaurant identifier, assigned by the server at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    /// Generate a new random [`RestaurantId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes a client supplies when creating a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    /// Restaurant name; unique together with `zipcode`.
    pub name: String,
    /// Postal code; unique together with `name`.
    pub zipcode: i32,
}

/// Restaurant with its derived rating fields.
///
/// ## Invariants
/// - `(name, zipcode)` is unique across all restaurants.
/// - The four rating fields are derived state: `None` until the aggregation
///   routine first writes them, and only ever mutated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Server-assigned identifier.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// Postal code.
    pub zipcode: i32,
    /// Average approved peanut rating, rounded to 2 decimals.
    pub rating_peanut: Option<f64>,
    /// Average approved egg rating, rounded to 2 decimals.
    pub rating_egg: Option<f64>,
    /// Average approved dairy rating, rounded to 2 decimals (wire name
    /// `ratingDiary`, the platform's historical spelling).
    #[serde(rename = "ratingDiary")]
    pub rating_dairy: Option<f64>,
    /// Mean of the per-allergen averages that have data, rounded to
    /// 2 decimals.
    pub overall_rating: Option<f64>,
}

impl Restaurant {
    /// Build a freshly created restaurant with no ratings yet.
    pub fn create(new: NewRestaurant) -> Self {
        Self {
            id: RestaurantId::random(),
            name: new.name,
            zipcode: new.zipcode,
            rating_peanut: None,
            rating_egg: None,
            rating_dairy: None,
            overall_rating: None,
        }
    }

    /// The stored rating for one allergen dimension.
    pub fn rating_for(&self, allergen: Allergen) -> Option<f64> {
        match allergen {
            Allergen::Peanut => self.rating_peanut,
            Allergen::Egg => self.rating_egg,
            Allergen::Dairy => self.rating_dairy,
        }
    }
}
