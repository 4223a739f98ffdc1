//! Profile use-cases.
//!
//! [`ProfileService`] implements both driving ports over a single
//! [`ProfileRepository`]. It owns validation, timestamping, and the mapping
//! from repository failures to domain errors. Storage faults are reported
//! with the operation's generic message; adapter detail only reaches the
//! logs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError};
use crate::domain::{Error, NewProfile, Profile, ProfileDraft, ProfileId, TraceId};

/// Message reported when a profile id does not resolve.
pub const PROFILE_NOT_FOUND: &str = "Profile not found";
/// Message reported when a write collides with an existing profile.
pub const PROFILE_EXISTS: &str = "Profile already exists";

/// Profile operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOperation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl ProfileOperation {
    /// Label used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Client-facing message for an unexpected failure.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error saving profile",
            Self::List => "Error fetching profiles",
            Self::Get => "Error fetching profile",
            Self::Update => "Error updating profile",
            Self::Delete => "Error deleting profile",
        }
    }
}

/// Profile service implementing [`ProfileCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileService<R> {
    /// Create a service over `repo`, stamping new profiles with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        // Stores keep millisecond precision; truncate so every adapter
        // returns the same instant it was given.
        let now = self.clock.utc();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }
}

fn map_repository_error(op: ProfileOperation, err: ProfileRepositoryError) -> Error {
    match err {
        ProfileRepositoryError::Duplicate { .. } => Error::conflict(PROFILE_EXISTS),
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(op.failure_message())
                .with_details(json!({ "reason": message }))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(op.failure_message()).with_details(json!({ "reason": message }))
        }
    }
}

fn parse_id(raw: &str) -> Result<ProfileId, Error> {
    ProfileId::new(raw).map_err(|_| not_found())
}

fn not_found() -> Error {
    Error::not_found(PROFILE_NOT_FOUND)
}

fn report(op: ProfileOperation, profile_id: Option<&str>, err: Error) -> Error {
    let trace_id = TraceId::current().map(|id| id.to_string());
    let details = err.details().map(ToString::to_string);
    if err.is_storage_fault() {
        tracing::error!(
            operation = op.as_str(),
            profile_id,
            trace_id,
            code = err.code().as_str(),
            details,
            "profile operation failed"
        );
    } else {
        tracing::debug!(
            operation = op.as_str(),
            profile_id,
            trace_id,
            code = err.code().as_str(),
            message = err.message(),
            "profile operation rejected"
        );
    }
    err
}

impl<R> ProfileService<R>
where
    R: ProfileRepository,
{
    async fn create_profile(&self, draft: ProfileDraft) -> Result<ProfileId, Error> {
        let fields = draft.into_new_fields().map_err(Error::from)?;
        let profile = NewProfile {
            fields,
            created_at: self.now(),
        };
        let stored = self
            .repo
            .create(&profile)
            .await
            .map_err(|err| map_repository_error(ProfileOperation::Create, err))?;
        tracing::info!(profile_id = %stored.id(), "profile created");
        Ok(stored.id().clone())
    }

    async fn get_profile(&self, raw_id: &str) -> Result<Profile, Error> {
        let id = parse_id(raw_id)?;
        self.repo
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error(ProfileOperation::Get, err))?
            .ok_or_else(not_found)
    }

    async fn update_profile(&self, raw_id: &str, draft: ProfileDraft) -> Result<Profile, Error> {
        let id = parse_id(raw_id)?;
        let patch = draft.into_patch().map_err(Error::from)?;
        let updated = self
            .repo
            .find_by_id_and_update(&id, &patch)
            .await
            .map_err(|err| map_repository_error(ProfileOperation::Update, err))?
            .ok_or_else(not_found)?;
        tracing::info!(profile_id = %id, "profile updated");
        Ok(updated)
    }

    async fn delete_profile(&self, raw_id: &str) -> Result<(), Error> {
        let id = parse_id(raw_id)?;
        self.repo
            .find_by_id_and_delete(&id)
            .await
            .map_err(|err| map_repository_error(ProfileOperation::Delete, err))?
            .ok_or_else(not_found)?;
        tracing::info!(profile_id = %id, "profile deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn create(&self, draft: ProfileDraft) -> Result<ProfileId, Error> {
        self.create_profile(draft)
            .await
            .map_err(|err| report(ProfileOperation::Create, None, err))
    }

    async fn update(&self, id: &str, draft: ProfileDraft) -> Result<Profile, Error> {
        self.update_profile(id, draft)
            .await
            .map_err(|err| report(ProfileOperation::Update, Some(id), err))
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_profile(id)
            .await
            .map_err(|err| report(ProfileOperation::Delete, Some(id), err))
    }
}

#[async_trait]
impl<R> ProfileQuery for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn list(&self) -> Result<Vec<Profile>, Error> {
        self.repo
            .find_all()
            .await
            .map_err(|err| map_repository_error(ProfileOperation::List, err))
            .map_err(|err| report(ProfileOperation::List, None, err))
    }

    async fn get(&self, id: &str) -> Result<Profile, Error> {
        self.get_profile(id)
            .await
            .map_err(|err| report(ProfileOperation::Get, Some(id), err))
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
