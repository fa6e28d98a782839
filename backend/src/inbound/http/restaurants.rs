//! Restaurant handlers.
//!
//! ```text
//! POST /restaurant
//! GET /restaurant/{id}
//! GET /restaurant/{zipcode}/allergy/{allergy}
//! ```

use actix_web::{get, http::header, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Allergen, Error, NewRestaurant, Restaurant, RestaurantId};
use crate::inbound::http::schemas::{ErrorSchema, RestaurantSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation request body for `POST /restaurant`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    /// Restaurant name; unique together with `zipcode`.
    pub name: String,
    /// Postal code; unique together with `name`.
    pub zipcode: i32,
}

/// Create a new restaurant with all rating fields unset.
#[utoipa::path(
    post,
    path = "/restaurant",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", headers(("Location" = String, description = "URL of the new restaurant"))),
        (status = 400, description = "Duplicate name and zipcode", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "createRestaurant"
)]
#[post("/restaurant")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRestaurantRequest>,
) -> ApiResult<HttpResponse> {
    let CreateRestaurantRequest { name, zipcode } = payload.into_inner();
    if name.trim().is_empty() {
        return Err(Error::invalid_request("restaurant name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })));
    }

    let created = state
        .restaurant_commands
        .create(NewRestaurant { name, zipcode })
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/restaurant/{}", created.id)))
        .finish())
}

/// Fetch one restaurant by identifier.
///
/// Ratings are served as stored; they are refreshed transactionally at
/// approval time, so reads never recompute.
#[utoipa::path(
    get,
    path = "/restaurant/{id}",
    params(("id" = Uuid, Path, description = "Restaurant identifier")),
    responses(
        (status = 200, description = "The restaurant", body = RestaurantSchema),
        (status = 404, description = "No such restaurant", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurantById"
)]
#[get("/restaurant/{id}")]
pub async fn get_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Restaurant>> {
    let id = RestaurantId::from_uuid(path.into_inner());
    let restaurant = state.restaurant_queries.fetch(&id).await?;
    Ok(web::Json(restaurant))
}

/// List restaurants in a zipcode rated for one allergen, best first.
///
/// An unrecognised allergen value yields an empty list rather than an
/// error, matching the platform's original behaviour.
#[utoipa::path(
    get,
    path = "/restaurant/{zipcode}/allergy/{allergy}",
    params(
        ("zipcode" = i32, Path, description = "Postal code to search"),
        ("allergy" = String, Path, description = "One of Peanut, Egg, Diary (case-sensitive)")
    ),
    responses(
        (status = 200, description = "Rated restaurants, best overall rating first", body = [RestaurantSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["restaurants"],
    operation_id = "listRestaurantsByZipcodeAndAllergy"
)]
#[get("/restaurant/{zipcode}/allergy/{allergy}")]
pub async fn list_restaurants_by_allergy(
    state: web::Data<HttpState>,
    path: web::Path<(i32, String)>,
) -> ApiResult<web::Json<Vec<Restaurant>>> {
    let (zipcode, allergy) = path.into_inner();
    let Ok(allergen) = allergy.parse::<Allergen>() else {
        warn!(value = %allergy, "unrecognised allergen filter");
        return Ok(web::Json(Vec::new()));
    };

    let rated = state.restaurant_queries.list_rated(zipcode, allergen).await?;
    Ok(web::Json(rated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_app, StubState};
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn rated(name: &str, zipcode: i32, peanut: Option<f64>, overall: Option<f64>) -> Restaurant {
        let mut restaurant = Restaurant::create(NewRestaurant {
            name: name.to_owned(),
            zipcode,
        });
        restaurant.rating_peanut = peanut;
        restaurant.overall_rating = overall;
        restaurant
    }

    #[actix_web::test]
    async fn creation_returns_created_with_location() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/restaurant")
                .set_json(json!({ "name": "Beans", "zipcode": 12345 }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let location = response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .expect("location header");
        assert!(location.starts_with("/restaurant/"));

        // The freshly created restaurant has no ratings yet.
        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(location).to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(fetched).await;
        assert!(body.get("ratingPeanut").and_then(Value::as_f64).is_none());
        assert!(body.get("overallRating").and_then(Value::as_f64).is_none());
    }

    #[actix_web::test]
    async fn creation_rejects_a_duplicate_placement() {
        let state = StubState::default().with_restaurant(rated("Beans", 12_345, None, None));
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/restaurant")
                .set_json(json!({ "name": "Beans", "zipcode": 12345 }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn same_name_in_a_different_zipcode_is_allowed() {
        let state = StubState::default().with_restaurant(rated("Beans", 12_345, None, None));
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/restaurant")
                .set_json(json!({ "name": "Beans", "zipcode": 54321 }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn fetching_an_unknown_restaurant_is_not_found() {
        let app = actix_test::init_service(test_app(StubState::default().into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/restaurant/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn fetching_twice_yields_identical_ratings() {
        let restaurant = rated("Beans", 12_345, Some(3.50), Some(3.50));
        let id = restaurant.id;
        let state = StubState::default().with_restaurant(restaurant);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let first: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri(&format!("/restaurant/{id}"))
                    .to_request(),
            )
            .await,
        )
        .await;
        let second: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri(&format!("/restaurant/{id}"))
                    .to_request(),
            )
            .await,
        )
        .await;

        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn listing_filters_unrated_restaurants_and_sorts_best_first() {
        let state = StubState::default()
            .with_restaurant(rated("Low", 12_345, Some(2.00), Some(2.00)))
            .with_restaurant(rated("High", 12_345, Some(4.50), Some(4.50)))
            .with_restaurant(rated("Unrated", 12_345, None, None))
            .with_restaurant(rated("Elsewhere", 99_999, Some(5.00), Some(5.00)));
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/restaurant/12345/allergy/Peanut")
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["High", "Low"]);
    }

    #[actix_web::test]
    async fn an_unknown_allergen_yields_an_empty_list() {
        let state = StubState::default()
            .with_restaurant(rated("Beans", 12_345, Some(4.00), Some(4.00)));
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/restaurant/12345/allergy/Gluten")
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn the_dairy_filter_uses_the_historical_spelling() {
        let mut restaurant = rated("Beans", 12_345, None, Some(3.00));
        restaurant.rating_dairy = Some(3.00);
        let state = StubState::default().with_restaurant(restaurant);
        let app = actix_test::init_service(test_app(state.into_state())).await;

        let diary = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/restaurant/12345/allergy/Diary")
                .to_request(),
        )
        .await;
        let diary_body: Value = actix_test::read_body_json(diary).await;
        assert_eq!(diary_body.as_array().map(Vec::len), Some(1));

        // The corrected spelling is not part of the contract.
        let dairy = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/restaurant/12345/allergy/Dairy")
                .to_request(),
        )
        .await;
        let dairy_body: Value = actix_test::read_body_json(dairy).await;
        assert_eq!(dairy_body.as_array().map(Vec::len), Some(0));
    }
}
