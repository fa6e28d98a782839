//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of the dining-review
//! platform, the review moderation state machine, and the rating
//! aggregation algorithm. Keep types transport- and storage-agnostic;
//! adapters live under `inbound` and `outbound`.

pub mod allergen;
pub mod error;
pub mod ports;
pub mod rating;
pub mod restaurant;
pub mod restaurant_service;
pub mod review;
pub mod review_service;
pub mod user;
pub mod user_service;

pub use self::allergen::{Allergen, UnknownAllergen};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::rating::RatingSummary;
pub use self::restaurant::{NewRestaurant, Restaurant, RestaurantId};
pub use self::restaurant_service::RestaurantDirectoryService;
pub use self::review::{
    ModerationVerdict, NewReview, Review, ReviewId, ReviewStatus,
};
pub use self::review_service::ReviewWorkflowService;
pub use self::user::{User, UserName, UserNameValidationError, UserProfile};
pub use self::user_service::UserDirectoryService;
