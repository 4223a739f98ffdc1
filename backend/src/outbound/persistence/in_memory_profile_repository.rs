//! Process-local `ProfileRepository` for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{NewProfile, Profile, ProfileId, ProfilePatch};

/// Profiles held in a map behind an async `RwLock`.
///
/// Identifiers are freshly generated ObjectIds so they look exactly like
/// the ones MongoDB hands out.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<ProfileId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        let id = ProfileId::new(ObjectId::new().to_hex())
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        let stored = Profile::new(id.clone(), profile.fields.clone(), profile.created_at);

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&id) {
            return Err(ProfileRepositoryError::duplicate(id.to_string()));
        }
        profiles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut all: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        Ok(all)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut profiles = self.profiles.write().await;
        let Some(stored) = profiles.get_mut(id) else {
            return Ok(None);
        };
        let fields = patch.clone().apply_to(stored.fields().clone());
        *stored = stored.clone().with_fields(fields);
        Ok(Some(stored.clone()))
    }

    async fn find_by_id_and_delete(
        &self,
        id: &ProfileId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.profiles.write().await.remove(id))
    }
}
