//! Restaurant creation, lookup and the allergy-filtered listing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    RestaurantCommand, RestaurantPersistenceError, RestaurantQuery, RestaurantRepository,
};
use crate::domain::{Allergen, Error, NewRestaurant, Restaurant, RestaurantId};

/// Restaurant directory service implementing the driving ports.
#[derive(Clone)]
pub struct RestaurantDirectoryService<R> {
    repo: Arc<R>,
}

impl<R> RestaurantDirectoryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> RestaurantDirectoryService<R>
where
    R: RestaurantRepository,
{
    fn map_restaurant_error(error: RestaurantPersistenceError) -> Error {
        match error {
            RestaurantPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
            }
            RestaurantPersistenceError::Query { message } => {
                Error::internal(format!("restaurant repository error: {message}"))
            }
            RestaurantPersistenceError::DuplicatePlacement { name, zipcode } => {
                Self::placement_taken(&name, zipcode)
            }
        }
    }

    fn placement_taken(name: &str, zipcode: i32) -> Error {
        Error::conflict("restaurant with the same name and zipcode already exists").with_details(
            json!({
                "name": name,
                "zipcode": zipcode,
                "code": "placement_taken",
            }),
        )
    }
}

#[async_trait]
impl<R> RestaurantCommand for RestaurantDirectoryService<R>
where
    R: RestaurantRepository,
{
    async fn create(&self, restaurant: NewRestaurant) -> Result<Restaurant, Error> {
        let existing = self
            .repo
            .count_by_name_and_zipcode(&restaurant.name, restaurant.zipcode)
            .await
            .map_err(Self::map_restaurant_error)?;
        if existing != 0 {
            return Err(Self::placement_taken(&restaurant.name, restaurant.zipcode));
        }

        // The unique index still backstops the count against a racing
        // creation; the adapter surfaces that as DuplicatePlacement.
        let restaurant = Restaurant::create(restaurant);
        self.repo
            .insert(&restaurant)
            .await
            .map_err(Self::map_restaurant_error)?;
        Ok(restaurant)
    }
}

#[async_trait]
impl<R> RestaurantQuery for RestaurantDirectoryService<R>
where
    R: RestaurantRepository,
{
    async fn fetch(&self, id: &RestaurantId) -> Result<Restaurant, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_restaurant_error)?
            .ok_or_else(|| Error::not_found(format!("restaurant not found: {id}")))
    }

    async fn list_rated(
        &self,
        zipcode: i32,
        allergen: Allergen,
    ) -> Result<Vec<Restaurant>, Error> {
        self.repo
            .list_rated_by_zipcode(zipcode, allergen)
            .await
            .map_err(Self::map_restaurant_error)
    }
}
