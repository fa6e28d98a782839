//! Port abstraction for restaurant persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Allergen, Restaurant, RestaurantId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "restaurant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "restaurant repository query failed: {message}",
        /// Insert violated the `(name, zipcode)` uniqueness constraint.
        DuplicatePlacement { name: String, zipcode: i32 } =>
            "restaurant already exists: {name} in {zipcode}",
    }
}

/// Port for restaurant storage and retrieval.
///
/// Absence is a normal outcome: lookups return `Ok(None)` and listings an
/// empty `Vec` rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Persist a newly created restaurant (rating fields unset).
    ///
    /// Returns [`RestaurantPersistenceError::DuplicatePlacement`] if another
    /// restaurant with the same `(name, zipcode)` was inserted concurrently.
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError>;

    /// Fetch a restaurant by identifier.
    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// Count restaurants matching `(name, zipcode)` exactly.
    async fn count_by_name_and_zipcode(
        &self,
        name: &str,
        zipcode: i32,
    ) -> Result<i64, RestaurantPersistenceError>;

    /// List restaurants in a zipcode with a non-null rating for the given
    /// allergen, ordered by overall rating descending.
    async fn list_rated_by_zipcode(
        &self,
        zipcode: i32,
        allergen: Allergen,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRestaurantRepository;

#[async_trait]
impl RestaurantRepository for FixtureRestaurantRepository {
    async fn insert(&self, _restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        Ok(None)
    }

    async fn count_by_name_and_zipcode(
        &self,
        _name: &str,
        _zipcode: i32,
    ) -> Result<i64, RestaurantPersistenceError> {
        Ok(0)
    }

    async fn list_rated_by_zipcode(
        &self,
        _zipcode: i32,
        _allergen: Allergen,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        Ok(Vec::new())
    }
}
