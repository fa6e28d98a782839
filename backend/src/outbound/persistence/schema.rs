//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database after a migration changes the schema.

diesel::table! {
    /// Registered users.
    ///
    /// `name` carries a unique index and is the external reference key; the
    /// UUID primary key never leaves the persistence layer.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, immutable user name.
        name -> Varchar,
        /// City of residence.
        city -> Varchar,
        /// State or region of residence.
        state -> Varchar,
        /// Postal code of residence.
        zipcode -> Int4,
        /// Peanut allergy flag.
        has_peanut_allergy -> Bool,
        /// Egg allergy flag.
        has_egg_allergy -> Bool,
        /// Dairy allergy flag.
        has_dairy_allergy -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Restaurants with their derived rating columns.
    ///
    /// `(name, zipcode)` carries a unique index. The four rating columns
    /// are written only by the rating refresh transaction.
    restaurants (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Restaurant name.
        name -> Varchar,
        /// Postal code.
        zipcode -> Int4,
        /// Average approved peanut rating.
        rating_peanut -> Nullable<Float8>,
        /// Average approved egg rating.
        rating_egg -> Nullable<Float8>,
        /// Average approved dairy rating.
        rating_dairy -> Nullable<Float8>,
        /// Mean of the rated dimensions.
        overall_rating -> Nullable<Float8>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted reviews in all moderation states.
    reviews (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Name of the submitting user.
        author -> Varchar,
        /// Reviewed restaurant.
        restaurant_id -> Uuid,
        /// Optional free-text commentary.
        comment -> Nullable<Text>,
        /// Optional peanut rating.
        rating_peanut -> Nullable<Int4>,
        /// Optional egg rating.
        rating_egg -> Nullable<Int4>,
        /// Optional dairy rating.
        rating_dairy -> Nullable<Int4>,
        /// Moderation state: pending, approved, or rejected.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(reviews -> restaurants (restaurant_id));
diesel::allow_tables_to_appear_in_same_query!(restaurants, reviews, users);
