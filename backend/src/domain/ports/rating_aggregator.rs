//! Port for recomputing a restaurant's derived rating fields.
//!
//! Ratings are a derived value over the restaurant's approved reviews,
//! refreshed at approval time. Adapters must perform the whole
//! load-compute-store sequence atomically so two concurrent approvals for
//! the same restaurant cannot interleave into a lost update.

use async_trait::async_trait;

use crate::domain::rating::RatingSummary;
use crate::domain::RestaurantId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating aggregation adapters.
    pub enum RatingRefreshError {
        /// Backing store connection could not be established.
        Connection { message: String } => "rating refresh connection failed: {message}",
        /// The refresh transaction failed during execution.
        Query { message: String } => "rating refresh failed: {message}",
    }
}

/// Port for the transactional rating refresh.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingAggregator: Send + Sync {
    /// Recompute and persist the four rating fields of one restaurant from
    /// its approved reviews.
    ///
    /// Returns the stored summary, or `Ok(None)` when the restaurant no
    /// longer exists (a vanished target is not an error for the caller).
    async fn refresh(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Option<RatingSummary>, RatingRefreshError>;
}

/// Fixture implementation reporting a vanished restaurant.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingAggregator;

#[async_trait]
impl RatingAggregator for FixtureRatingAggregator {
    async fn refresh(
        &self,
        _restaurant_id: &RestaurantId,
    ) -> Result<Option<RatingSummary>, RatingRefreshError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_reports_missing_restaurant() {
        let aggregator = FixtureRatingAggregator;
        let summary = aggregator
            .refresh(&RestaurantId::random())
            .await
            .expect("fixture refresh");
        assert!(summary.is_none());
    }
}
