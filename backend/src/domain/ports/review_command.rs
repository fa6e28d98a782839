//! Driving port for review submission and moderation.

use async_trait::async_trait;

use crate::domain::{Error, ModerationVerdict, NewReview, Review, ReviewId, UserName};

/// Use-cases mutating review records.
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Submit a review on behalf of `submitting_user`.
    ///
    /// The user must exist, must be the review's author, and the referenced
    /// restaurant must exist. The stored review is always pending,
    /// regardless of anything the client supplied.
    async fn submit(
        &self,
        submitting_user: &UserName,
        review: NewReview,
    ) -> Result<Review, Error>;

    /// Apply an administrator verdict to a pending review.
    ///
    /// Fails with not-found for unknown ids and with a conflict when the
    /// review has already been moderated. Approval triggers the rating
    /// refresh for the review's restaurant.
    async fn moderate(&self, id: &ReviewId, verdict: ModerationVerdict) -> Result<Review, Error>;
}

/// Fixture implementation for wiring without a database.
///
/// Submission echoes the would-be stored review; moderation reports
/// not-found since the fixture stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewCommand;

#[async_trait]
impl ReviewCommand for FixtureReviewCommand {
    async fn submit(
        &self,
        _submitting_user: &UserName,
        review: NewReview,
    ) -> Result<Review, Error> {
        Ok(Review::submit(review))
    }

    async fn moderate(&self, id: &ReviewId, _verdict: ModerationVerdict) -> Result<Review, Error> {
        Err(Error::not_found(format!("review not found: {id}")))
    }
}
