//! Administrator moderation handlers.
//!
//! ```text
//! GET /admin/reviews
//! PUT /admin/reviews/{id}/status/{approve}
//! ```

use actix_web::{get, put, web};
use uuid::Uuid;

use crate::domain::{ModerationVerdict, Review, ReviewId};
use crate::inbound::http::schemas::{ErrorSchema, ReviewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every review awaiting moderation.
#[utoipa::path(
    get,
    path = "/admin/reviews",
    responses(
        (status = 200, description = "Pending reviews", body = [ReviewSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listPendingReviews"
)]
#[get("/admin/reviews")]
pub async fn list_pending_reviews(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Review>>> {
    let pending = state.review_queries.list_pending().await?;
    Ok(web::Json(pending))
}

/// Approve or reject a pending review.
///
/// Approval triggers the rating refresh for the reviewed restaurant;
/// rejection only records the decision. Either way the review becomes
/// immutable.
#[utoipa::path(
    put,
    path = "/admin/reviews/{id}/status/{approve}",
    params(
        ("id" = Uuid, Path, description = "Review identifier"),
        ("approve" = bool, Path, description = "true to approve, false to reject")
    ),
    responses(
        (status = 200, description = "The moderated review", body = ReviewSchema),
        (status = 400, description = "Review is not pending", body = ErrorSchema),
        (status = 404, description = "No such review", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "moderateReview"
)]
#[put("/admin/reviews/{id}/status/{approve}")]
pub async fn moderate_review(
    state: web::Data<HttpState>,
    path: web::Path<(Uuid, bool)>,
) -> ApiResult<web::Json<Review>> {
    let (id, approve) = path.into_inner();
    let review = state
        .review_commands
        .moderate(&ReviewId::from_uuid(id), ModerationVerdict::from(approve))
        .await?;
    Ok(web::Json(review))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRestaurant, NewReview, Restaurant, RestaurantId, UserName};
    use crate::inbound::http::test_utils::{test_app, StubState};
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn pending_review(author: &str, restaurant_id: RestaurantId) -> crate::domain::Review {
        crate::domain::Review::submit(NewReview {
            author: UserName::new(author).expect("valid name"),
            restaurant_id,
            comment: None,
            rating_peanut: Some(4),
            rating_egg: None,
            rating_dairy: Some(2),
        })
    }

    #[actix_web::test]
    async fn pending_queue_lists_only_unmoderated_reviews() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let pending = pending_review("ada", restaurant.id);
        let mut approved = pending_review("ada", restaurant.id);
        approved.status = crate::domain::ReviewStatus::Approved;

        let state = StubState::default()
            .with_restaurant(restaurant)
            .with_review(pending.clone())
            .with_review(approved);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/admin/reviews")
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        let listed = body.as_array().expect("array body");
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed
                .first()
                .and_then(|r| r.get("id"))
                .and_then(Value::as_str),
            Some(pending.id.to_string().as_str())
        );
    }

    #[actix_web::test]
    async fn approval_updates_status_and_restaurant_ratings() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let restaurant_id = restaurant.id;
        let review = pending_review("ada", restaurant_id);
        let review_id = review.id;

        let state = StubState::default()
            .with_restaurant(restaurant)
            .with_review(review);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/admin/reviews/{review_id}/status/true"))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("APPROVED"));

        // Ratings must now reflect the approved review (zero-fallback on
        // the egg dimension, overall over the two rated dimensions).
        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/restaurant/{restaurant_id}"))
                .to_request(),
        )
        .await;
        let stored: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(stored.get("ratingPeanut").and_then(Value::as_f64), Some(4.0));
        assert_eq!(stored.get("ratingEgg").and_then(Value::as_f64), Some(0.0));
        assert_eq!(stored.get("ratingDiary").and_then(Value::as_f64), Some(2.0));
        assert_eq!(
            stored.get("overallRating").and_then(Value::as_f64),
            Some(3.0)
        );
    }

    #[actix_web::test]
    async fn rejection_leaves_ratings_untouched() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let restaurant_id = restaurant.id;
        let review = pending_review("ada", restaurant_id);
        let review_id = review.id;

        let state = StubState::default()
            .with_restaurant(restaurant)
            .with_review(review);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/admin/reviews/{review_id}/status/false"))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("REJECTED"));

        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/restaurant/{restaurant_id}"))
                .to_request(),
        )
        .await;
        let stored: Value = actix_test::read_body_json(fetched).await;
        assert!(stored.get("ratingPeanut").and_then(Value::as_f64).is_none());
        assert!(stored.get("overallRating").and_then(Value::as_f64).is_none());
    }

    #[actix_web::test]
    async fn a_second_moderation_attempt_is_rejected() {
        let restaurant = Restaurant::create(NewRestaurant {
            name: "Beans".to_owned(),
            zipcode: 12_345,
        });
        let review = pending_review("ada", restaurant.id);
        let review_id = review.id;

        let state = StubState::default()
            .with_restaurant(restaurant)
            .with_review(review);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/admin/reviews/{review_id}/status/false"))
                .to_request(),
        )
        .await;
        assert!(first.status().is_success());

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/admin/reviews/{review_id}/status/true"))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), actix_web::http::StatusCode::BAD_REQUEST);

        // The first decision is preserved.
        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/reviews/{review_id}"))
                .to_request(),
        )
        .await;
        let stored: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(stored.get("status").and_then(Value::as_str), Some("REJECTED"));
    }

    #[actix_web::test]
    async fn moderating_an_unknown_review_is_not_found() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/admin/reviews/{}/status/true", uuid::Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
