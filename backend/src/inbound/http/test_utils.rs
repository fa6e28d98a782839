//! Shared helpers for handler tests: an in-memory implementation of the
//! driving ports plus an app factory registering every endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    RestaurantCommand, RestaurantQuery, ReviewCommand, ReviewQuery, UserCommand, UserQuery,
};
use crate::domain::{
    rating, Allergen, Error, ModerationVerdict, NewRestaurant, NewReview, Restaurant, RestaurantId,
    Review, ReviewId, ReviewStatus, User, UserName, UserProfile,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{admin, restaurants, reviews, users};

#[derive(Default)]
struct StubStore {
    users: HashMap<String, User>,
    restaurants: HashMap<Uuid, Restaurant>,
    reviews: HashMap<Uuid, Review>,
}

impl StubStore {
    fn approved_reviews_for(&self, restaurant_id: RestaurantId) -> Vec<Review> {
        self.reviews
            .values()
            .filter(|review| {
                review.restaurant_id == restaurant_id && review.status == ReviewStatus::Approved
            })
            .cloned()
            .collect()
    }
}

/// In-memory implementation of every driving port, mirroring the domain
/// services closely enough for endpoint-level assertions.
#[derive(Clone)]
struct StubPorts {
    store: Arc<Mutex<StubStore>>,
}

impl StubPorts {
    fn lock(&self) -> std::sync::MutexGuard<'_, StubStore> {
        self.store.lock().expect("stub store poisoned")
    }
}

#[async_trait]
impl UserCommand for StubPorts {
    async fn register(&self, user: User) -> Result<User, Error> {
        let mut store = self.lock();
        if store.users.contains_key(user.name.as_ref()) {
            return Err(Error::conflict("user name already taken"));
        }
        store.users.insert(user.name.to_string(), user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        name: &UserName,
        profile: UserProfile,
    ) -> Result<User, Error> {
        let mut store = self.lock();
        let user = store
            .users
            .get_mut(name.as_ref())
            .ok_or_else(|| Error::not_found(format!("user not found: {name}")))?;
        user.profile = profile;
        Ok(user.clone())
    }
}

#[async_trait]
impl UserQuery for StubPorts {
    async fn fetch(&self, name: &UserName) -> Result<User, Error> {
        self.lock()
            .users
            .get(name.as_ref())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("user not found: {name}")))
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        Ok(self.lock().users.values().cloned().collect())
    }
}

#[async_trait]
impl ReviewCommand for StubPorts {
    async fn submit(
        &self,
        submitting_user: &UserName,
        review: NewReview,
    ) -> Result<Review, Error> {
        let mut store = self.lock();
        let user = store
            .users
            .get(submitting_user.as_ref())
            .ok_or_else(|| Error::conflict("submitting user is not registered"))?;
        if review.author != user.name {
            return Err(Error::conflict("submitting user is not the review author"));
        }
        if !store
            .restaurants
            .contains_key(review.restaurant_id.as_uuid())
        {
            return Err(Error::conflict("reviewed restaurant does not exist"));
        }
        let review = Review::submit(review);
        store.reviews.insert(*review.id.as_uuid(), review.clone());
        Ok(review)
    }

    async fn moderate(&self, id: &ReviewId, verdict: ModerationVerdict) -> Result<Review, Error> {
        let mut store = self.lock();
        let review = store
            .reviews
            .get_mut(id.as_uuid())
            .ok_or_else(|| Error::not_found(format!("review not found: {id}")))?;
        if !review.status.is_pending() {
            return Err(Error::conflict("review has already been moderated"));
        }
        review.status = verdict.status();
        let moderated = review.clone();

        if moderated.status == ReviewStatus::Approved {
            let approved = store.approved_reviews_for(moderated.restaurant_id);
            let summary = rating::summarize(&approved);
            if let Some(restaurant) =
                store.restaurants.get_mut(moderated.restaurant_id.as_uuid())
            {
                restaurant.rating_peanut = Some(summary.rating_peanut);
                restaurant.rating_egg = Some(summary.rating_egg);
                restaurant.rating_dairy = Some(summary.rating_dairy);
                restaurant.overall_rating = summary.overall;
            }
        }
        Ok(moderated)
    }
}

#[async_trait]
impl ReviewQuery for StubPorts {
    async fn fetch(&self, id: &ReviewId) -> Result<Review, Error> {
        self.lock()
            .reviews
            .get(id.as_uuid())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("review not found: {id}")))
    }

    async fn list_pending(&self) -> Result<Vec<Review>, Error> {
        Ok(self
            .lock()
            .reviews
            .values()
            .filter(|review| review.status.is_pending())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RestaurantCommand for StubPorts {
    async fn create(&self, restaurant: NewRestaurant) -> Result<Restaurant, Error> {
        let mut store = self.lock();
        let duplicate = store
            .restaurants
            .values()
            .any(|existing| existing.name == restaurant.name && existing.zipcode == restaurant.zipcode);
        if duplicate {
            return Err(Error::conflict(
                "restaurant with the same name and zipcode already exists",
            ));
        }
        let restaurant = Restaurant::create(restaurant);
        store
            .restaurants
            .insert(*restaurant.id.as_uuid(), restaurant.clone());
        Ok(restaurant)
    }
}

#[async_trait]
impl RestaurantQuery for StubPorts {
    async fn fetch(&self, id: &RestaurantId) -> Result<Restaurant, Error> {
        self.lock()
            .restaurants
            .get(id.as_uuid())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("restaurant not found: {id}")))
    }

    async fn list_rated(
        &self,
        zipcode: i32,
        allergen: Allergen,
    ) -> Result<Vec<Restaurant>, Error> {
        let mut rated: Vec<Restaurant> = self
            .lock()
            .restaurants
            .values()
            .filter(|restaurant| {
                restaurant.zipcode == zipcode && restaurant.rating_for(allergen).is_some()
            })
            .cloned()
            .collect();
        rated.sort_by(|a, b| {
            b.overall_rating
                .partial_cmp(&a.overall_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(rated)
    }
}

/// Builder seeding the in-memory store behind the stub ports.
#[derive(Default)]
pub(crate) struct StubState {
    store: StubStore,
}

impl StubState {
    /// Seed a registered user with a canned profile.
    pub(crate) fn with_user(mut self, name: &str) -> Self {
        let name = UserName::new(name).expect("valid fixture name");
        let user = User::new(
            name.clone(),
            UserProfile {
                city: "Berlin".to_owned(),
                state: "BE".to_owned(),
                zipcode: 10_115,
                has_peanut_allergy: true,
                has_egg_allergy: false,
                has_dairy_allergy: false,
            },
        );
        self.store.users.insert(name.to_string(), user);
        self
    }

    /// Seed a restaurant as-is.
    pub(crate) fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.store
            .restaurants
            .insert(*restaurant.id.as_uuid(), restaurant);
        self
    }

    /// Seed a review as-is.
    pub(crate) fn with_review(mut self, review: Review) -> Self {
        self.store.reviews.insert(*review.id.as_uuid(), review);
        self
    }

    /// Wire every driving port to the shared stub store.
    pub(crate) fn into_state(self) -> HttpState {
        let ports = StubPorts {
            store: Arc::new(Mutex::new(self.store)),
        };
        HttpState::new(HttpStatePorts {
            user_commands: Arc::new(ports.clone()),
            user_queries: Arc::new(ports.clone()),
            review_commands: Arc::new(ports.clone()),
            review_queries: Arc::new(ports.clone()),
            restaurant_commands: Arc::new(ports.clone()),
            restaurant_queries: Arc::new(ports),
        })
    }
}

/// App factory registering every endpoint against the given state.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(users::register_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(reviews::get_review)
        .service(reviews::submit_review)
        .service(admin::list_pending_reviews)
        .service(admin::moderate_review)
        .service(restaurants::create_restaurant)
        .service(restaurants::get_restaurant)
        .service(restaurants::list_restaurants_by_allergy)
}
