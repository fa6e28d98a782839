//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    RestaurantCommand, RestaurantQuery, ReviewCommand, ReviewQuery, UserCommand, UserQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// User registration and profile updates.
    pub user_commands: Arc<dyn UserCommand>,
    /// User lookups.
    pub user_queries: Arc<dyn UserQuery>,
    /// Review submission and moderation.
    pub review_commands: Arc<dyn ReviewCommand>,
    /// Review lookups and the moderation queue.
    pub review_queries: Arc<dyn ReviewQuery>,
    /// Restaurant creation.
    pub restaurant_commands: Arc<dyn RestaurantCommand>,
    /// Restaurant lookups and filtered listings.
    pub restaurant_queries: Arc<dyn RestaurantQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User registration and profile updates.
    pub user_commands: Arc<dyn UserCommand>,
    /// User lookups.
    pub user_queries: Arc<dyn UserQuery>,
    /// Review submission and moderation.
    pub review_commands: Arc<dyn ReviewCommand>,
    /// Review lookups and the moderation queue.
    pub review_queries: Arc<dyn ReviewQuery>,
    /// Restaurant creation.
    pub restaurant_commands: Arc<dyn RestaurantCommand>,
    /// Restaurant lookups and filtered listings.
    pub restaurant_queries: Arc<dyn RestaurantQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            user_commands,
            user_queries,
            review_commands,
            review_queries,
            restaurant_commands,
            restaurant_queries,
        } = ports;
        Self {
            user_commands,
            user_queries,
            review_commands,
            review_queries,
            restaurant_commands,
            restaurant_queries,
        }
    }

    /// State wired entirely to fixtures, for tests and DB-less wiring.
    pub fn fixtures() -> Self {
        use crate::domain::ports::{
            FixtureRestaurantCommand, FixtureRestaurantQuery, FixtureReviewCommand,
            FixtureReviewQuery, FixtureUserCommand, FixtureUserQuery,
        };

        Self::new(HttpStatePorts {
            user_commands: Arc::new(FixtureUserCommand),
            user_queries: Arc::new(FixtureUserQuery),
            review_commands: Arc::new(FixtureReviewCommand),
            review_queries: Arc::new(FixtureReviewQuery),
            restaurant_commands: Arc::new(FixtureRestaurantCommand),
            restaurant_queries: Arc::new(FixtureRestaurantQuery),
        })
    }
}
