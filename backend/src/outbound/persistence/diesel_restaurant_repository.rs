//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{Allergen, Restaurant, RestaurantId};

use super::models::{NewRestaurantRow, RestaurantRow};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain restaurant repository errors.
fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RestaurantPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain restaurant repository errors.
fn map_diesel_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RestaurantPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RestaurantPersistenceError::connection("database connection error")
        }
        _ => RestaurantPersistenceError::query("database error"),
    }
}

/// Map insert errors, turning a unique violation into the duplicate
/// placement variant the service treats as a conflict.
fn map_insert_error(
    error: diesel::result::Error,
    restaurant: &Restaurant,
) -> RestaurantPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(
        &error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return RestaurantPersistenceError::duplicate_placement(
            restaurant.name.clone(),
            restaurant.zipcode,
        );
    }
    map_diesel_error(error)
}

/// Convert a database row to a domain restaurant.
pub(crate) fn row_to_restaurant(row: RestaurantRow) -> Restaurant {
    Restaurant {
        id: RestaurantId::from_uuid(row.id),
        name: row.name,
        zipcode: row.zipcode,
        rating_peanut: row.rating_peanut,
        rating_egg: row.rating_egg,
        rating_dairy: row.rating_dairy,
        overall_rating: row.overall_rating,
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Rating columns stay NULL; only the refresh transaction writes them.
        let new_row = NewRestaurantRow {
            id: *restaurant.id.as_uuid(),
            name: &restaurant.name,
            zipcode: restaurant.zipcode,
        };

        diesel::insert_into(restaurants::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, restaurant))
    }

    async fn find_by_id(
        &self,
        id: &RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RestaurantRow> = restaurants::table
            .filter(restaurants::id.eq(id.as_uuid()))
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_restaurant))
    }

    async fn count_by_name_and_zipcode(
        &self,
        name: &str,
        zipcode: i32,
    ) -> Result<i64, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        restaurants::table
            .filter(restaurants::name.eq(name).and(restaurants::zipcode.eq(zipcode)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_rated_by_zipcode(
        &self,
        zipcode: i32,
        allergen: Allergen,
    ) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let base = restaurants::table.filter(restaurants::zipcode.eq(zipcode));
        let rows: Vec<RestaurantRow> = match allergen {
            Allergen::Peanut => {
                base.filter(restaurants::rating_peanut.is_not_null())
                    .order(restaurants::overall_rating.desc().nulls_last())
                    .select(RestaurantRow::as_select())
                    .load(&mut conn)
                    .await
            }
            Allergen::Egg => {
                base.filter(restaurants::rating_egg.is_not_null())
                    .order(restaurants::overall_rating.desc().nulls_last())
                    .select(RestaurantRow::as_select())
                    .load(&mut conn)
                    .await
            }
            Allergen::Dairy => {
                base.filter(restaurants::rating_dairy.is_not_null())
                    .order(restaurants::overall_rating.desc().nulls_last())
                    .select(RestaurantRow::as_select())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_restaurant).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            RestaurantPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, RestaurantPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_nullable_ratings() {
        let row = RestaurantRow {
            id: Uuid::new_v4(),
            name: "Beans".to_owned(),
            zipcode: 12_345,
            rating_peanut: Some(3.33),
            rating_egg: None,
            rating_dairy: Some(0.0),
            overall_rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let restaurant = row_to_restaurant(row);

        assert_eq!(restaurant.rating_peanut, Some(3.33));
        assert_eq!(restaurant.rating_egg, None);
        assert_eq!(restaurant.rating_dairy, Some(0.0));
        assert_eq!(restaurant.overall_rating, None);
    }
}
