//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI
//! documentation; the wrappers mirror the wire shape of their domain
//! counterparts (serde attributes included, so renames like `ratingDiary`
//! document correctly) but live in the inbound adapter layer where
//! framework concerns belong.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// A uniqueness or state-machine rule rejected the operation.
    Conflict,
    /// A backing dependency could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user name already taken")]
    message: String,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::User)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Unique, immutable user name.
    #[schema(example = "ada")]
    name: String,
    /// City of residence.
    city: String,
    /// State or region of residence.
    state: String,
    /// Postal code of residence.
    zipcode: i32,
    /// Whether the user tracks the peanut allergy dimension.
    has_peanut_allergy: bool,
    /// Whether the user tracks the egg allergy dimension.
    has_egg_allergy: bool,
    /// Whether the user tracks the dairy allergy dimension.
    has_dairy_allergy: bool,
}

/// OpenAPI schema for [`crate::domain::ReviewStatus`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::ReviewStatus)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatusSchema {
    /// Submitted, awaiting an administrator decision.
    Pending,
    /// Accepted; counts towards the restaurant's ratings.
    Approved,
    /// Declined; never counts towards ratings.
    Rejected,
}

/// OpenAPI schema for [`crate::domain::Review`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::Review)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    /// Server-assigned identifier.
    id: Uuid,
    /// Name of the submitting user.
    author: String,
    /// Restaurant the review targets.
    #[serde(rename = "restaurantID")]
    restaurant_id: Uuid,
    /// Optional free-text commentary.
    comment: Option<String>,
    /// Optional peanut rating.
    rating_peanut: Option<i32>,
    /// Optional egg rating.
    rating_egg: Option<i32>,
    /// Optional dairy rating.
    #[serde(rename = "ratingDiary")]
    rating_dairy: Option<i32>,
    /// Moderation state.
    status: ReviewStatusSchema,
}

/// OpenAPI schema for [`crate::domain::Restaurant`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::Restaurant)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "used only for OpenAPI schema generation via utoipa"
)]
pub struct RestaurantSchema {
    /// Server-assigned identifier.
    id: Uuid,
    /// Restaurant name.
    name: String,
    /// Postal code.
    zipcode: i32,
    /// Average approved peanut rating, 2 decimals.
    rating_peanut: Option<f64>,
    /// Average approved egg rating, 2 decimals.
    rating_egg: Option<f64>,
    /// Average approved dairy rating, 2 decimals.
    #[serde(rename = "ratingDiary")]
    rating_dairy: Option<f64>,
    /// Mean of the rated dimensions, 2 decimals.
    overall_rating: Option<f64>,
}
