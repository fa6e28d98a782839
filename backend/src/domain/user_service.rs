//! User registration and profile maintenance services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{UserCommand, UserPersistenceError, UserQuery, UserRepository};
use crate::domain::{Error, User, UserName, UserProfile};

/// User directory service implementing the driving ports.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    repo: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserDirectoryService<R>
where
    R: UserRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateName { name } => Self::name_taken(&name),
        }
    }

    fn name_taken(name: &str) -> Error {
        Error::conflict("user name already taken").with_details(json!({
            "field": "name",
            "value": name,
            "code": "name_taken",
        }))
    }
}

#[async_trait]
impl<R> UserCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn register(&self, user: User) -> Result<User, Error> {
        let existing = self
            .repo
            .find_by_name(&user.name)
            .await
            .map_err(Self::map_user_error)?;
        if existing.is_some() {
            return Err(Self::name_taken(user.name.as_ref()));
        }

        // The unique index still backstops the lookup against a racing
        // registration; the adapter surfaces that as DuplicateName.
        self.repo.insert(&user).await.map_err(Self::map_user_error)?;
        Ok(user)
    }

    async fn update_profile(
        &self,
        name: &UserName,
        profile: UserProfile,
    ) -> Result<User, Error> {
        let existing = self
            .repo
            .find_by_name(name)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user not found: {name}")))?;

        let updated = User::new(existing.name, profile);
        self.repo
            .update(&updated)
            .await
            .map_err(Self::map_user_error)?;
        Ok(updated)
    }
}

#[async_trait]
impl<R> UserQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn fetch(&self, name: &UserName) -> Result<User, Error> {
        self.repo
            .find_by_name(name)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user not found: {name}")))
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.repo.list().await.map_err(Self::map_user_error)
    }
}
