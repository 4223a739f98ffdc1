//! Driven port for profile persistence.
//!
//! The operations mirror what a document store offers natively: insert,
//! scan, point lookup, atomic find-and-patch, and find-and-delete. Each
//! call is a single round trip; validation happens in the domain before any
//! of them is invoked.

use async_trait::async_trait;

use crate::domain::{NewProfile, Profile, ProfileId, ProfilePatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } =>
            "profile already exists: {message}",
    }
}

/// Port for profile storage and retrieval.
///
/// `find_all` returns profiles newest first, breaking `created_at` ties by
/// identifier descending so the order is stable across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile and return it with its store-assigned identifier.
    async fn create(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError>;

    /// Every stored profile, newest first.
    async fn find_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Fetch a single profile.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Apply `patch` to an existing profile in one atomic step.
    ///
    /// Keys absent from the patch keep whatever is stored at write time, so
    /// concurrent patches touching different fields both survive. Returns the
    /// updated record, or `None` when no profile has this id. `created_at` is
    /// never touched.
    async fn find_by_id_and_update(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Remove a profile, returning the removed record when it existed.
    async fn find_by_id_and_delete(
        &self,
        id: &ProfileId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
