//! Driving port for restaurant creation.

use async_trait::async_trait;

use crate::domain::{Error, NewRestaurant, Restaurant};

/// Use-cases mutating restaurant records.
#[async_trait]
pub trait RestaurantCommand: Send + Sync {
    /// Create a restaurant with all rating fields unset.
    ///
    /// Fails with a conflict when a restaurant with the same
    /// `(name, zipcode)` already exists.
    async fn create(&self, restaurant: NewRestaurant) -> Result<Restaurant, Error>;
}

/// Fixture implementation echoing the would-be created restaurant.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantCommand;

#[async_trait]
impl RestaurantCommand for FixtureRestaurantCommand {
    async fn create(&self, restaurant: NewRestaurant) -> Result<Restaurant, Error> {
        Ok(Restaurant::create(restaurant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_creates_with_unset_ratings() {
        let restaurant = FixtureRestaurantCommand
            .create(NewRestaurant {
                name: "Beans".to_owned(),
                zipcode: 12_345,
            })
            .await
            .expect("fixture create");
        assert!(restaurant.overall_rating.is_none());
    }
}
