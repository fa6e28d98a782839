//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use dining_review_backend::doc::ApiDoc;
use dining_review_backend::domain::{
    RestaurantDirectoryService, ReviewWorkflowService, UserDirectoryService,
};
use dining_review_backend::inbound::http::admin::{list_pending_reviews, moderate_review};
use dining_review_backend::inbound::http::health::{live, ready, HealthState};
use dining_review_backend::inbound::http::restaurants::{
    create_restaurant, get_restaurant, list_restaurants_by_allergy,
};
use dining_review_backend::inbound::http::reviews::{get_review, submit_review};
use dining_review_backend::inbound::http::state::{HttpState, HttpStatePorts};
use dining_review_backend::inbound::http::users::{
    get_user, list_users, register_user, update_user,
};
use dining_review_backend::outbound::persistence::{
    DieselRatingAggregator, DieselRestaurantRepository, DieselReviewRepository,
    DieselUserRepository,
};
use dining_review_backend::Trace;

/// Build the HTTP port bundle from configuration.
///
/// Uses Diesel-backed services when a pool is available; otherwise the
/// fixture ports serve requests (tests and local smoke runs only).
fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    match &config.db_pool {
        Some(pool) => {
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            let restaurants = Arc::new(DieselRestaurantRepository::new(pool.clone()));
            let reviews = Arc::new(DieselReviewRepository::new(pool.clone()));
            let aggregator = Arc::new(DieselRatingAggregator::new(pool.clone()));

            let user_service = Arc::new(UserDirectoryService::new(users.clone()));
            let review_service = Arc::new(ReviewWorkflowService::new(
                reviews,
                users,
                restaurants.clone(),
                aggregator,
            ));
            let restaurant_service = Arc::new(RestaurantDirectoryService::new(restaurants));

            HttpStatePorts {
                user_commands: user_service.clone(),
                user_queries: user_service,
                review_commands: review_service.clone(),
                review_queries: review_service,
                restaurant_commands: restaurant_service.clone(),
                restaurant_queries: restaurant_service,
            }
        }
        None => {
            let fixtures = HttpState::fixtures();
            HttpStatePorts {
                user_commands: fixtures.user_commands,
                user_queries: fixtures.user_queries,
                review_commands: fixtures.review_commands,
                review_queries: fixtures.review_queries,
                restaurant_commands: fixtures.restaurant_commands,
                restaurant_queries: fixtures.restaurant_queries,
            }
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(register_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(get_review)
        .service(submit_review)
        .service(list_pending_reviews)
        .service(moderate_review)
        .service(create_restaurant)
        .service(get_restaurant)
        .service(list_restaurants_by_allergy)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(HttpState::new(build_ports(&config)));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
