//! Driving port for review lookups and the moderation queue.

use async_trait::async_trait;

use crate::domain::{Error, Review, ReviewId};

/// Use-cases reading review records.
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Fetch one review by identifier, failing with not-found when absent.
    async fn fetch(&self, id: &ReviewId) -> Result<Review, Error>;

    /// List every review still awaiting moderation, in storage order.
    async fn list_pending(&self) -> Result<Vec<Review>, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewQuery;

#[async_trait]
impl ReviewQuery for FixtureReviewQuery {
    async fn fetch(&self, id: &ReviewId) -> Result<Review, Error> {
        Err(Error::not_found(format!("review not found: {id}")))
    }

    async fn list_pending(&self) -> Result<Vec<Review>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_fetch_reports_not_found() {
        let err = FixtureReviewQuery
            .fetch(&ReviewId::random())
            .await
            .expect_err("fixture stores nothing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
