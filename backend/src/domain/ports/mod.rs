//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod rating_aggregator;
mod restaurant_command;
mod restaurant_query;
mod restaurant_repository;
mod review_command;
mod review_query;
mod review_repository;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use rating_aggregator::MockRatingAggregator;
pub use rating_aggregator::{FixtureRatingAggregator, RatingAggregator, RatingRefreshError};
pub use restaurant_command::{FixtureRestaurantCommand, RestaurantCommand};
pub use restaurant_query::{FixtureRestaurantQuery, RestaurantQuery};
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{
    FixtureRestaurantRepository, RestaurantPersistenceError, RestaurantRepository,
};
pub use review_command::{FixtureReviewCommand, ReviewCommand};
pub use review_query::{FixtureReviewQuery, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{FixtureReviewRepository, ReviewPersistenceError, ReviewRepository};
pub use user_command::{FixtureUserCommand, UserCommand};
pub use user_query::{FixtureUserQuery, UserQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
