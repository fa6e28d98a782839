//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert violated the unique name constraint.
        DuplicateName { name: String } => "user name already registered: {name}",
    }
}

/// Port for user storage and retrieval.
///
/// Absence is a normal outcome: lookups return `Ok(None)` rather than an
/// error when no user matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a newly registered user.
    ///
    /// Returns [`UserPersistenceError::DuplicateName`] if another user with
    /// the same name was inserted concurrently.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace the profile of an existing user, keyed by name.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by unique name.
    async fn find_by_name(&self, name: &UserName) -> Result<Option<User>, UserPersistenceError>;

    /// List every registered user in storage order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return `None`, listings are empty, and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn update(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_name(&self, _name: &UserName) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }
}
