//! Port abstraction for review persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Review, ReviewId, ReviewStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

/// Port for review storage and retrieval.
///
/// Absence is a normal outcome: lookups return `Ok(None)` and listings an
/// empty `Vec` rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a newly submitted review.
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError>;

    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError>;

    /// List every review currently in the given status, in storage order.
    async fn list_by_status(
        &self,
        status: ReviewStatus,
    ) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Persist a status transition decided by moderation.
    async fn set_status(
        &self,
        id: &ReviewId,
        status: ReviewStatus,
    ) -> Result<(), ReviewPersistenceError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn insert(&self, _review: &Review) -> Result<(), ReviewPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        Ok(None)
    }

    async fn list_by_status(
        &self,
        _status: ReviewStatus,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        Ok(Vec::new())
    }

    async fn set_status(
        &self,
        _id: &ReviewId,
        _status: ReviewStatus,
    ) -> Result<(), ReviewPersistenceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureReviewRepository;
        let found = repo
            .find_by_id(&ReviewId::random())
            .await
            .expect("fixture lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_listing_is_empty() {
        let repo = FixtureReviewRepository;
        let pending = repo
            .list_by_status(ReviewStatus::Pending)
            .await
            .expect("fixture listing");
        assert!(pending.is_empty());
    }
}
