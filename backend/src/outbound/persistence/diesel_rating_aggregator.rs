//! PostgreSQL-backed `RatingAggregator` running the rating refresh in a
//! single transaction.
//!
//! The refresh locks the restaurant row, loads its approved reviews,
//! computes the summary with the pure domain function, and writes the four
//! rating columns. Concurrent approvals for the same restaurant therefore
//! serialise instead of racing into a lost update.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RatingAggregator, RatingRefreshError};
use crate::domain::rating::{self, RatingSummary};
use crate::domain::{RestaurantId, ReviewStatus};

use super::diesel_review_repository::{row_to_review, status_to_db};
use super::models::{RestaurantRatingsUpdate, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::{restaurants, reviews};

/// Diesel-backed implementation of the `RatingAggregator` port.
#[derive(Clone)]
pub struct DieselRatingAggregator {
    pool: DbPool,
}

impl DieselRatingAggregator {
    /// Create a new aggregator with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to refresh errors.
fn map_pool_error(error: PoolError) -> RatingRefreshError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RatingRefreshError::connection(message)
        }
    }
}

impl From<diesel::result::Error> for RatingRefreshError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error")
            }
            other => Self::query(other.to_string()),
        }
    }
}

#[async_trait]
impl RatingAggregator for DieselRatingAggregator {
    async fn refresh(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Option<RatingSummary>, RatingRefreshError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = *restaurant_id.as_uuid();

        conn.transaction::<Option<RatingSummary>, RatingRefreshError, _>(|conn| {
            async move {
                // Lock the restaurant row for the duration of the refresh so
                // concurrent approvals serialise.
                let locked: Option<Uuid> = restaurants::table
                    .filter(restaurants::id.eq(target))
                    .select(restaurants::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(None);
                }

                let rows: Vec<ReviewRow> = reviews::table
                    .filter(
                        reviews::restaurant_id
                            .eq(target)
                            .and(reviews::status.eq(status_to_db(ReviewStatus::Approved))),
                    )
                    .select(ReviewRow::as_select())
                    .load(conn)
                    .await?;

                let approved = rows
                    .into_iter()
                    .map(row_to_review)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| RatingRefreshError::query(err.to_string()))?;

                let summary = rating::summarize(&approved);
                diesel::update(restaurants::table.filter(restaurants::id.eq(target)))
                    .set(&RestaurantRatingsUpdate {
                        rating_peanut: Some(summary.rating_peanut),
                        rating_egg: Some(summary.rating_egg),
                        rating_dairy: Some(summary.rating_dairy),
                        overall_rating: summary.overall,
                    })
                    .execute(conn)
                    .await?;

                Ok(Some(summary))
            }
            .scope_boxed()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, RatingRefreshError::Connection { .. }));
    }

    #[rstest]
    fn diesel_rollback_errors_map_to_query_errors() {
        let err = RatingRefreshError::from(diesel::result::Error::RollbackTransaction);
        assert!(matches!(err, RatingRefreshError::Query { .. }));
    }
}
