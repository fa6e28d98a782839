//! Review submission and lookup handlers.
//!
//! ```text
//! GET /reviews/{id}
//! POST /users/{name}/review
//! ```

use actix_web::{get, http::header, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, NewReview, RestaurantId, Review, ReviewId, UserName,
};
use crate::inbound::http::schemas::{ErrorSchema, ReviewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Submission request body for `POST /users/{name}/review`.
///
/// Any client-supplied status is ignored: submission always stores a
/// pending review. Ratings are unvalidated integers; any subset may be
/// present.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// Name of the review author; must match the path user.
    pub author: String,
    /// Restaurant the review targets.
    #[serde(rename = "restaurantID")]
    pub restaurant_id: Uuid,
    /// Optional free-text commentary.
    pub comment: Option<String>,
    /// Optional peanut rating.
    pub rating_peanut: Option<i32>,
    /// Optional egg rating.
    pub rating_egg: Option<i32>,
    /// Optional dairy rating (wire name `ratingDiary`).
    #[serde(rename = "ratingDiary")]
    pub rating_dairy: Option<i32>,
}

/// Fetch one review by identifier.
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "The review", body = ReviewSchema),
        (status = 404, description = "No such review", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "getReviewById"
)]
#[get("/reviews/{id}")]
pub async fn get_review(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Review>> {
    let id = ReviewId::from_uuid(path.into_inner());
    let review = state.review_queries.fetch(&id).await?;
    Ok(web::Json(review))
}

/// Submit a review on behalf of the path user.
///
/// The stored review is always pending; only an administrator approval
/// makes it count towards the restaurant's ratings.
#[utoipa::path(
    post,
    path = "/users/{name}/review",
    params(("name" = String, Path, description = "Submitting user's name")),
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review submitted", headers(("Location" = String, description = "URL of the new review"))),
        (status = 400, description = "Unknown user, author mismatch, or unknown restaurant", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "submitReview"
)]
#[post("/users/{name}/review")]
pub async fn submit_review(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SubmitReviewRequest>,
) -> ApiResult<HttpResponse> {
    let raw_name = path.into_inner();
    // A name that cannot exist cannot have registered; the submission
    // preconditions answer that with a conflict, like any unknown user.
    let submitting_user = UserName::new(&raw_name).map_err(|_| {
        Error::conflict("submitting user is not registered").with_details(json!({
            "field": "name",
            "value": raw_name,
            "code": "unknown_user",
        }))
    })?;

    let SubmitReviewRequest {
        author,
        restaurant_id,
        comment,
        rating_peanut,
        rating_egg,
        rating_dairy,
    } = payload.into_inner();

    let author = UserName::new(&author).map_err(|_| {
        Error::conflict("submitting user is not the review author").with_details(json!({
            "field": "author",
            "value": author,
            "code": "author_mismatch",
        }))
    })?;

    let review = NewReview {
        author,
        restaurant_id: RestaurantId::from_uuid(restaurant_id),
        comment,
        rating_peanut,
        rating_egg,
        rating_dairy,
    };

    let created = state.review_commands.submit(&submitting_user, review).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/reviews/{}", created.id)))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRestaurant, Restaurant};
    use crate::inbound::http::test_utils::{test_app, StubState};
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn submission(author: &str, restaurant_id: Uuid) -> Value {
        json!({
            "author": author,
            "restaurantID": restaurant_id,
            "comment": "clear labelling",
            "ratingPeanut": 4,
            "ratingDiary": 2,
        })
    }

    #[actix_web::test]
    async fn submission_creates_a_pending_review() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let restaurant_id = *restaurant.id.as_uuid();
        let state = StubState::default()
            .with_user("ada")
            .with_restaurant(restaurant);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users/ada/review")
                .set_json(submission("ada", restaurant_id))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let location = response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .expect("location header");

        // The stored review is retrievable and pending, no matter what the
        // client might have claimed.
        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(location).to_request(),
        )
        .await;
        assert!(fetched.status().is_success());
        let body: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("PENDING"));
        assert_eq!(body.get("ratingDiary").and_then(Value::as_i64), Some(2));
    }

    #[actix_web::test]
    async fn submission_ignores_a_client_supplied_status() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let restaurant_id = *restaurant.id.as_uuid();
        let state = StubState::default()
            .with_user("ada")
            .with_restaurant(restaurant);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let mut body = submission("ada", restaurant_id);
        if let Some(map) = body.as_object_mut() {
            map.insert("status".to_owned(), json!("APPROVED"));
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users/ada/review")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

        let location = response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .expect("location header")
            .to_owned();
        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&location).to_request(),
        )
        .await;
        let stored: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(stored.get("status").and_then(Value::as_str), Some("PENDING"));
    }

    #[actix_web::test]
    async fn submission_by_an_unknown_user_fails() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users/ghost/review")
                .set_json(submission("ghost", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn submission_with_a_mismatched_author_fails() {
        let state = StubState::default().with_user("ada");
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/users/ada/review")
                .set_json(submission("impostor", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn fetching_an_unknown_review_is_not_found() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/reviews/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
