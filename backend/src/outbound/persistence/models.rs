//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{restaurants, reviews, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    #[expect(dead_code, reason = "surrogate key never leaves the persistence layer")]
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zipcode: i32,
    pub has_peanut_allergy: bool,
    pub has_egg_allergy: bool,
    pub has_dairy_allergy: bool,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zipcode: i32,
    pub has_peanut_allergy: bool,
    pub has_egg_allergy: bool,
    pub has_dairy_allergy: bool,
}

/// Changeset struct for replacing a user's profile.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub city: &'a str,
    pub state: &'a str,
    pub zipcode: i32,
    pub has_peanut_allergy: bool,
    pub has_egg_allergy: bool,
    pub has_dairy_allergy: bool,
}

/// Row struct for reading from the restaurants table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: Uuid,
    pub name: String,
    pub zipcode: i32,
    pub rating_peanut: Option<f64>,
    pub rating_egg: Option<f64>,
    pub rating_dairy: Option<f64>,
    pub overall_rating: Option<f64>,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new restaurant records.
///
/// Rating columns are intentionally absent: a new restaurant starts with
/// all four NULL and only the rating refresh writes them.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = restaurants)]
pub(crate) struct NewRestaurantRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub zipcode: i32,
}

/// Changeset struct for the rating refresh.
///
/// `treat_none_as_null` matters here: an undefined overall rating must be
/// written back as NULL, not skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = restaurants)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RestaurantRatingsUpdate {
    pub rating_peanut: Option<f64>,
    pub rating_egg: Option<f64>,
    pub rating_dairy: Option<f64>,
    pub overall_rating: Option<f64>,
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub author: String,
    pub restaurant_id: Uuid,
    pub comment: Option<String>,
    pub rating_peanut: Option<i32>,
    pub rating_egg: Option<i32>,
    pub rating_dairy: Option<i32>,
    pub status: String,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub author: &'a str,
    pub restaurant_id: Uuid,
    pub comment: Option<&'a str>,
    pub rating_peanut: Option<i32>,
    pub rating_egg: Option<i32>,
    pub rating_dairy: Option<i32>,
    pub status: &'a str,
}
