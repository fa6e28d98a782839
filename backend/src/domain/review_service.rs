//! Review submission and moderation workflow.
//!
//! This service owns the one real state machine in the system: reviews are
//! created pending, transition exactly once to approved or rejected, and an
//! approval triggers the transactional rating refresh for the reviewed
//! restaurant.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    RatingAggregator, RatingRefreshError, RestaurantPersistenceError, RestaurantRepository,
    ReviewCommand, ReviewPersistenceError, ReviewQuery, ReviewRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, ModerationVerdict, NewReview, Review, ReviewId, ReviewStatus, UserName,
};

/// Review workflow service implementing the driving ports.
#[derive(Clone)]
pub struct ReviewWorkflowService<R, U, S, A> {
    reviews: Arc<R>,
    users: Arc<U>,
    restaurants: Arc<S>,
    aggregator: Arc<A>,
}

impl<R, U, S, A> ReviewWorkflowService<R, U, S, A> {
    /// Create a new service over the given repositories and aggregator.
    pub fn new(reviews: Arc<R>, users: Arc<U>, restaurants: Arc<S>, aggregator: Arc<A>) -> Self {
        Self {
            reviews,
            users,
            restaurants,
            aggregator,
        }
    }
}

impl<R, U, S, A> ReviewWorkflowService<R, U, S, A>
where
    R: ReviewRepository,
    U: UserRepository,
    S: RestaurantRepository,
    A: RatingAggregator,
{
    fn map_review_error(error: ReviewPersistenceError) -> Error {
        match error {
            ReviewPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("review repository unavailable: {message}"))
            }
            ReviewPersistenceError::Query { message } => {
                Error::internal(format!("review repository error: {message}"))
            }
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateName { name } => {
                Error::internal(format!("unexpected duplicate user name: {name}"))
            }
        }
    }

    fn map_restaurant_error(error: RestaurantPersistenceError) -> Error {
        match error {
            RestaurantPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
            }
            RestaurantPersistenceError::Query { message } => {
                Error::internal(format!("restaurant repository error: {message}"))
            }
            RestaurantPersistenceError::DuplicatePlacement { name, zipcode } => Error::internal(
                format!("unexpected restaurant conflict: {name} in {zipcode}"),
            ),
        }
    }

    fn map_refresh_error(error: RatingRefreshError) -> Error {
        match error {
            RatingRefreshError::Connection { message } => {
                Error::service_unavailable(format!("rating refresh unavailable: {message}"))
            }
            RatingRefreshError::Query { message } => {
                Error::internal(format!("rating refresh failed: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R, U, S, A> ReviewCommand for ReviewWorkflowService<R, U, S, A>
where
    R: ReviewRepository,
    U: UserRepository,
    S: RestaurantRepository,
    A: RatingAggregator,
{
    async fn submit(
        &self,
        submitting_user: &UserName,
        review: NewReview,
    ) -> Result<Review, Error> {
        let user = self
            .users
            .find_by_name(submitting_user)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| {
                Error::conflict("submitting user is not registered").with_details(json!({
                    "field": "name",
                    "value": submitting_user.as_ref(),
                    "code": "unknown_user",
                }))
            })?;

        if review.author != user.name {
            return Err(
                Error::conflict("submitting user is not the review author").with_details(json!({
                    "field": "author",
                    "value": review.author.as_ref(),
                    "code": "author_mismatch",
                })),
            );
        }

        let restaurant = self
            .restaurants
            .find_by_id(&review.restaurant_id)
            .await
            .map_err(Self::map_restaurant_error)?;
        if restaurant.is_none() {
            return Err(
                Error::conflict("reviewed restaurant does not exist").with_details(json!({
                    "field": "restaurantID",
                    "value": review.restaurant_id.to_string(),
                    "code": "unknown_restaurant",
                })),
            );
        }

        let review = Review::submit(review);
        self.reviews
            .insert(&review)
            .await
            .map_err(Self::map_review_error)?;
        Ok(review)
    }

    async fn moderate(&self, id: &ReviewId, verdict: ModerationVerdict) -> Result<Review, Error> {
        let review = self
            .reviews
            .find_by_id(id)
            .await
            .map_err(Self::map_review_error)?
            .ok_or_else(|| Error::not_found(format!("review not found: {id}")))?;

        if !review.status.is_pending() {
            return Err(
                Error::conflict("review has already been moderated").with_details(json!({
                    "field": "status",
                    "value": review.status.to_string(),
                    "code": "not_pending",
                })),
            );
        }

        let status = verdict.status();
        self.reviews
            .set_status(id, status)
            .await
            .map_err(Self::map_review_error)?;

        if status == ReviewStatus::Approved {
            let summary = self
                .aggregator
                .refresh(&review.restaurant_id)
                .await
                .map_err(Self::map_refresh_error)?;
            if summary.is_none() {
                // The approval stands even if the restaurant vanished
                // between submission and moderation.
                warn!(restaurant_id = %review.restaurant_id, "rating refresh target missing");
            }
        }

        Ok(Review { status, ..review })
    }
}

#[async_trait]
impl<R, U, S, A> ReviewQuery for ReviewWorkflowService<R, U, S, A>
where
    R: ReviewRepository,
    U: UserRepository,
    S: RestaurantRepository,
    A: RatingAggregator,
{
    async fn fetch(&self, id: &ReviewId) -> Result<Review, Error> {
        self.reviews
            .find_by_id(id)
            .await
            .map_err(Self::map_review_error)?
            .ok_or_else(|| Error::not_found(format!("review not found: {id}")))
    }

    async fn list_pending(&self) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_by_status(ReviewStatus::Pending)
            .await
            .map_err(Self::map_review_error)
    }
}
