//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::{Error, Profile, ProfileDraft, ProfileId};

/// Create, update, and delete operations on profiles.
///
/// Identifiers arrive as raw strings from the transport; implementations
/// treat malformed identifiers as missing profiles rather than failing the
/// request outright.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Validate and store a new profile, returning its identifier.
    async fn create(&self, draft: ProfileDraft) -> Result<ProfileId, Error>;

    /// Merge `draft` over the stored profile and persist the result.
    async fn update(&self, id: &str, draft: ProfileDraft) -> Result<Profile, Error>;

    /// Remove a profile.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
