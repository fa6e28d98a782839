//! Users API handlers.
//!
//! ```text
//! POST /users
//! GET /users
//! GET /users/{name}
//! PUT /users/{name}
//! ```

use actix_web::{get, http::header, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::domain::{Error, User, UserName, UserNameValidationError, UserProfile};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Unique user name; immutable once registered.
    pub name: String,
    /// City of residence.
    pub city: String,
    /// State or region of residence.
    pub state: String,
    /// Postal code of residence.
    pub zipcode: i32,
    /// Whether the user tracks the peanut allergy dimension.
    pub has_peanut_allergy: bool,
    /// Whether the user tracks the egg allergy dimension.
    pub has_egg_allergy: bool,
    /// Whether the user tracks the dairy allergy dimension.
    pub has_dairy_allergy: bool,
}

/// Update request body for `PUT /users/{name}`.
///
/// The name is immutable; a body name differing from the path is logged
/// and ignored, everything else is replaced wholesale.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Optional echo of the user name; ignored when it differs.
    pub name: Option<String>,
    /// City of residence.
    pub city: String,
    /// State or region of residence.
    pub state: String,
    /// Postal code of residence.
    pub zipcode: i32,
    /// Whether the user tracks the peanut allergy dimension.
    pub has_peanut_allergy: bool,
    /// Whether the user tracks the egg allergy dimension.
    pub has_egg_allergy: bool,
    /// Whether the user tracks the dairy allergy dimension.
    pub has_dairy_allergy: bool,
}

fn map_name_validation_error(err: UserNameValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "name",
        "code": "invalid_name",
    }))
}

/// Parse a path user name. A name that cannot exist is reported as
/// not-found, matching a lookup miss.
fn parse_path_name(raw: &str) -> Result<UserName, Error> {
    UserName::new(raw).map_err(|_| Error::not_found(format!("user not found: {raw}")))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Invalid name or name taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterUserRequest {
        name,
        city,
        state: region,
        zipcode,
        has_peanut_allergy,
        has_egg_allergy,
        has_dairy_allergy,
    } = payload.into_inner();

    let name = UserName::new(name).map_err(map_name_validation_error)?;
    let user = User::new(
        name,
        UserProfile {
            city,
            state: region,
            zipcode,
            has_peanut_allergy,
            has_egg_allergy,
            has_dairy_allergy,
        },
    );

    let created = state.user_commands.register(user).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", created.name)))
        .finish())
}

/// List all registered users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All registered users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.user_queries.list().await?;
    Ok(web::Json(users))
}

/// Fetch one user by name.
#[utoipa::path(
    get,
    path = "/users/{name}",
    params(("name" = String, Path, description = "Unique user name")),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByName"
)]
#[get("/users/{name}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let name = parse_path_name(&path.into_inner())?;
    let user = state.user_queries.fetch(&name).await?;
    Ok(web::Json(user))
}

/// Update a user's profile. The name is immutable.
#[utoipa::path(
    put,
    path = "/users/{name}",
    params(("name" = String, Path, description = "Unique user name")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "The updated user", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{name}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let name = parse_path_name(&path.into_inner())?;
    let UpdateUserRequest {
        name: body_name,
        city,
        state: region,
        zipcode,
        has_peanut_allergy,
        has_egg_allergy,
        has_dairy_allergy,
    } = payload.into_inner();

    if let Some(body_name) = body_name {
        if body_name != name.as_ref() {
            warn!(path_name = %name, body_name = %body_name, "user name is immutable; ignoring body name");
        }
    }

    let profile = UserProfile {
        city,
        state: region,
        zipcode,
        has_peanut_allergy,
        has_egg_allergy,
        has_dairy_allergy,
    };
    let updated = state.user_commands.update_profile(&name, profile).await?;
    Ok(web::Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_app, StubState};
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn register_body(name: &str) -> Value {
        json!({
            "name": name,
            "city": "Berlin",
            "state": "BE",
            "zipcode": 10115,
            "hasPeanutAllergy": true,
            "hasEggAllergy": false,
            "hasDairyAllergy": false,
        })
    }

    #[actix_web::test]
    async fn register_returns_created_with_location() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(register_body("ada"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get("Location")
                .and_then(|v| v.to_str().ok()),
            Some("/users/ada")
        );
    }

    #[actix_web::test]
    async fn register_rejects_a_taken_name_with_conflict_body() {
        let state = StubState::default().with_user("ada");
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(register_body("ada"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn register_rejects_an_invalid_name() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users")
                .set_json(register_body("ada lovelace"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
    }

    #[actix_web::test]
    async fn get_user_serialises_camel_case_flags() {
        let state = StubState::default().with_user("ada");
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/ada").to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("name").and_then(Value::as_str), Some("ada"));
        assert!(body.get("hasPeanutAllergy").is_some());
        assert!(body.get("has_peanut_allergy").is_none());
    }

    #[actix_web::test]
    async fn get_unknown_user_is_not_found() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/users/nobody")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_ignores_a_differing_body_name() {
        let state = StubState::default().with_user("ada");
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/users/ada")
                .set_json(json!({
                    "name": "someone-else",
                    "city": "Hamburg",
                    "state": "HH",
                    "zipcode": 20095,
                    "hasPeanutAllergy": false,
                    "hasEggAllergy": true,
                    "hasDairyAllergy": false,
                }))
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("name").and_then(Value::as_str), Some("ada"));
        assert_eq!(body.get("city").and_then(Value::as_str), Some("Hamburg"));
    }

    #[actix_web::test]
    async fn update_of_an_unknown_user_is_not_found() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/users/nobody")
                .set_json(json!({
                    "city": "Hamburg",
                    "state": "HH",
                    "zipcode": 20095,
                    "hasPeanutAllergy": false,
                    "hasEggAllergy": false,
                    "hasDairyAllergy": false,
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
