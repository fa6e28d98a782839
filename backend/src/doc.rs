//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (users, reviews,
//!   admin moderation, restaurants, health)
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   document domain types without coupling them to utoipa
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, RestaurantSchema, ReviewSchema, ReviewStatusSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dining review backend API",
        description = "HTTP interface for user registration, allergy-specific restaurant reviews, and administrator moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::reviews::get_review,
        crate::inbound::http::reviews::submit_review,
        crate::inbound::http::admin::list_pending_reviews,
        crate::inbound::http::admin::moderate_review,
        crate::inbound::http::restaurants::create_restaurant,
        crate::inbound::http::restaurants::get_restaurant,
        crate::inbound::http::restaurants::list_restaurants_by_allergy,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        ReviewSchema,
        ReviewStatusSchema,
        RestaurantSchema,
    )),
    tags(
        (name = "users", description = "Registration and profile maintenance"),
        (name = "reviews", description = "Review submission and lookup"),
        (name = "admin", description = "Moderation queue and decisions"),
        (name = "restaurants", description = "Restaurant directory and rated listings"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
