//! Driving port for restaurant lookups and the allergy-filtered listing.

use async_trait::async_trait;

use crate::domain::{Allergen, Error, Restaurant, RestaurantId};

/// Use-cases reading restaurant records.
#[async_trait]
pub trait RestaurantQuery: Send + Sync {
    /// Fetch one restaurant by identifier, failing with not-found when
    /// absent. Ratings are read as stored; they are refreshed at approval
    /// time, not on reads.
    async fn fetch(&self, id: &RestaurantId) -> Result<Restaurant, Error>;

    /// List restaurants in a zipcode rated for the given allergen, best
    /// overall rating first.
    async fn list_rated(&self, zipcode: i32, allergen: Allergen)
        -> Result<Vec<Restaurant>, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantQuery;

#[async_trait]
impl RestaurantQuery for FixtureRestaurantQuery {
    async fn fetch(&self, id: &RestaurantId) -> Result<Restaurant, Error> {
        Err(Error::not_found(format!("restaurant not found: {id}")))
    }

    async fn list_rated(
        &self,
        _zipcode: i32,
        _allergen: Allergen,
    ) -> Result<Vec<Restaurant>, Error> {
        Ok(Vec::new())
    }
}
