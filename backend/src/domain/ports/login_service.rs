//! Driving port for the login form.
//!
//! There is no account model behind this port. The fixture implementation
//! accepts a single development credential pair and issues nothing; it only
//! exists so the browser form has a backend to talk to.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials};

/// Message reported for rejected credentials.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials, returning the accepted username.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<String, Error>;
}

/// Development authenticator: `admin` / `password` succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<String, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            Ok(credentials.username().to_owned())
        } else {
            tracing::info!(username = credentials.username(), "login rejected");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "Password", false)]
    #[case("guest", "password", false)]
    #[tokio::test]
    async fn fixture_accepts_only_development_pair(
        #[case] username: &str,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (accepted, result) {
            (true, Ok(name)) => assert_eq!(name, "admin"),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), INVALID_CREDENTIALS);
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(name)) => panic!("expected rejection, got {name}"),
        }
    }
}
