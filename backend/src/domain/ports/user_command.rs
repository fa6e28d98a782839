//! Driving port for user registration and profile updates.

use async_trait::async_trait;

use crate::domain::{Error, User, UserName, UserProfile};

/// Use-cases mutating user records.
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with a conflict when the name is already taken; the existing
    /// user is left untouched.
    async fn register(&self, user: User) -> Result<User, Error>;

    /// Replace the profile of an existing user. The name is immutable and
    /// only identifies the record.
    async fn update_profile(&self, name: &UserName, profile: UserProfile)
        -> Result<User, Error>;
}

/// Fixture implementation echoing inputs, for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserCommand;

#[async_trait]
impl UserCommand for FixtureUserCommand {
    async fn register(&self, user: User) -> Result<User, Error> {
        Ok(user)
    }

    async fn update_profile(
        &self,
        name: &UserName,
        profile: UserProfile,
    ) -> Result<User, Error> {
        Ok(User::new(name.clone(), profile))
    }
}
