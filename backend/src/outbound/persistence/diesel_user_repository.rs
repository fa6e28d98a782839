//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserName, UserProfile};

use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Map insert errors, turning a unique violation into the duplicate-name
/// variant the service treats as a conflict.
fn map_insert_error(error: diesel::result::Error, name: &UserName) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if matches!(
        &error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        return UserPersistenceError::duplicate_name(name.as_ref());
    }
    map_diesel_error(error)
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let name = UserName::new(row.name)
        .map_err(|err| UserPersistenceError::query(format!("stored user name invalid: {err}")))?;
    Ok(User::new(
        name,
        UserProfile {
            city: row.city,
            state: row.state,
            zipcode: row.zipcode,
            has_peanut_allergy: row.has_peanut_allergy,
            has_egg_allergy: row.has_egg_allergy,
            has_dairy_allergy: row.has_dairy_allergy,
        },
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            name: user.name.as_ref(),
            city: &user.profile.city,
            state: &user.profile.state,
            zipcode: user.profile.zipcode,
            has_peanut_allergy: user.profile.has_peanut_allergy,
            has_egg_allergy: user.profile.has_egg_allergy,
            has_dairy_allergy: user.profile.has_dairy_allergy,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, &user.name))
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = UserProfileUpdate {
            city: &user.profile.city,
            state: &user.profile.state,
            zipcode: user.profile.zipcode,
            has_peanut_allergy: user.profile.has_peanut_allergy,
            has_egg_allergy: user.profile.has_egg_allergy,
            has_dairy_allergy: user.profile.has_dairy_allergy,
        };

        let updated_rows = diesel::update(users::table)
            .filter(users::name.eq(user.name.as_ref()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(UserPersistenceError::query("user not found for update"));
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &UserName) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::name.eq(name.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
