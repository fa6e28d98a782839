//! PostgreSQL persistence adapters implementing the domain's driven ports.
//!
//! Adapters are thin translators between domain types and Diesel rows; they
//! contain no business logic. The one exception by design is the rating
//! aggregator, which calls the pure domain summary function inside its
//! transaction so the stored rating columns stay consistent with the
//! approved review set.

mod diesel_rating_aggregator;
mod diesel_restaurant_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_rating_aggregator::DieselRatingAggregator;
pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
