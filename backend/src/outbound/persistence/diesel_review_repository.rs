//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::{RestaurantId, Review, ReviewId, ReviewStatus, UserName};

use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain review repository errors.
fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ReviewPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain review repository errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
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
        DieselError::NotFound => ReviewPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReviewPersistenceError::connection("database connection error")
        }
        _ => ReviewPersistenceError::query("database error"),
    }
}

/// Moderation state as stored in the `status` column.
pub(crate) fn status_to_db(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Pending => "pending",
        ReviewStatus::Approved => "approved",
        ReviewStatus::Rejected => "rejected",
    }
}

/// Parse a stored status column value.
///
/// An unrecognised value is a query error, never a defaulted status: the
/// moderation state machine must not be corrupted by bad data.
fn status_from_db(raw: &str) -> Result<ReviewStatus, ReviewPersistenceError> {
    match raw {
        "pending" => Ok(ReviewStatus::Pending),
        "approved" => Ok(ReviewStatus::Approved),
        "rejected" => Ok(ReviewStatus::Rejected),
        other => Err(ReviewPersistenceError::query(format!(
            "unrecognised stored review status: {other}"
        ))),
    }
}

/// Convert a database row to a domain review.
pub(crate) fn row_to_review(row: ReviewRow) -> Result<Review, ReviewPersistenceError> {
    let author = UserName::new(row.author).map_err(|err| {
        ReviewPersistenceError::query(format!("stored review author invalid: {err}"))
    })?;
    Ok(Review {
        id: ReviewId::from_uuid(row.id),
        author,
        restaurant_id: RestaurantId::from_uuid(row.restaurant_id),
        comment: row.comment,
        rating_peanut: row.rating_peanut,
        rating_egg: row.rating_egg,
        rating_dairy: row.rating_dairy,
        status: status_from_db(&row.status)?,
    })
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewReviewRow {
            id: *review.id.as_uuid(),
            author: review.author.as_ref(),
            restaurant_id: *review.restaurant_id.as_uuid(),
            comment: review.comment.as_deref(),
            rating_peanut: review.rating_peanut,
            rating_egg: review.rating_egg,
            rating_dairy: review.rating_dairy,
            status: status_to_db(review.status),
        };

        diesel::insert_into(reviews::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ReviewRow> = reviews::table
            .filter(reviews::id.eq(id.as_uuid()))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_review).transpose()
    }

    async fn list_by_status(
        &self,
        status: ReviewStatus,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::status.eq(status_to_db(status)))
            .order(reviews::created_at.asc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_review).collect()
    }

    async fn set_status(
        &self,
        id: &ReviewId,
        status: ReviewStatus,
    ) -> Result<(), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(reviews::table)
            .filter(reviews::id.eq(id.as_uuid()))
            .set(reviews::status.eq(status_to_db(status)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(ReviewPersistenceError::query("review not found for update"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(status: &str) -> ReviewRow {
        ReviewRow {
            id: Uuid::new_v4(),
            author: "ada".to_owned(),
            restaurant_id: Uuid::new_v4(),
            comment: Some("clear labelling".to_owned()),
            rating_peanut: Some(4),
            rating_egg: None,
            rating_dairy: Some(2),
            status: status.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(ReviewStatus::Pending, "pending")]
    #[case(ReviewStatus::Approved, "approved")]
    #[case(ReviewStatus::Rejected, "rejected")]
    fn status_round_trips_through_the_column_encoding(
        #[case] status: ReviewStatus,
        #[case] stored: &str,
    ) {
        assert_eq!(status_to_db(status), stored);
        assert_eq!(status_from_db(stored), Ok(status));
    }

    #[rstest]
    fn unrecognised_status_is_a_query_error() {
        let err = status_from_db("escalated").expect_err("unknown status");
        assert!(matches!(err, ReviewPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_partial_ratings() {
        let review = row_to_review(row("approved")).expect("valid row");

        assert_eq!(review.status, ReviewStatus::Approved);
        assert_eq!(review.rating_peanut, Some(4));
        assert_eq!(review.rating_egg, None);
        assert_eq!(review.rating_dairy, Some(2));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, ReviewPersistenceError::Connection { .. }));
    }
}
