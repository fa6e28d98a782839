//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserName, UserProfile};

/// Use-cases reading user records.
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch one user by unique name, failing with not-found when absent.
    async fn fetch(&self, name: &UserName) -> Result<User, Error>;

    /// List every registered user.
    async fn list(&self) -> Result<Vec<User>, Error>;
}

/// Fixture implementation synthesising a user for any name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserQuery;

#[async_trait]
impl UserQuery for FixtureUserQuery {
    async fn fetch(&self, name: &UserName) -> Result<User, Error> {
        Ok(User::new(
            name.clone(),
            UserProfile {
                city: String::new(),
                state: String::new(),
                zipcode: 0,
                has_peanut_allergy: false,
                has_egg_allergy: false,
                has_dairy_allergy: false,
            },
        ))
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_synthesises_the_requested_name() {
        let name = UserName::new("ada").expect("valid name");
        let user = FixtureUserQuery.fetch(&name).await.expect("fixture fetch");
        assert_eq!(user.name, name);
    }
}
