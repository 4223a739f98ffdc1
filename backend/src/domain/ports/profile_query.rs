//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, Profile};

/// Read-only access to stored profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// All profiles, newest first.
    async fn list(&self) -> Result<Vec<Profile>, Error>;

    /// A single profile by its raw identifier.
    async fn get(&self, id: &str) -> Result<Profile, Error>;
}
