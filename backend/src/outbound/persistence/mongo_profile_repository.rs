//! MongoDB-backed `ProfileRepository` implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use tracing::debug;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{NewProfile, Profile, ProfileId, ProfilePatch};

use super::client::MongoStore;
use super::documents::{ProfileDocument, object_id, patch_update};
use super::mongo_error_mapping::map_mongo_error;

/// Collection holding profile documents.
pub const PROFILES_COLLECTION: &str = "profiles";

/// Repository storing profiles as documents in [`PROFILES_COLLECTION`].
#[derive(Clone, Debug)]
pub struct MongoProfileRepository {
    profiles: Collection<ProfileDocument>,
}

impl MongoProfileRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            profiles: store.database().collection(PROFILES_COLLECTION),
        }
    }
}

#[async_trait]
impl ProfileRepository for MongoProfileRepository {
    async fn create(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        let document = ProfileDocument::new(ObjectId::new(), &profile.fields, profile.created_at);
        self.profiles
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;
        Profile::try_from(document)
    }

    async fn find_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let cursor = self
            .profiles
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<ProfileDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;
        debug!(count = documents.len(), "loaded profiles");
        documents.into_iter().map(Profile::try_from).collect()
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        self.profiles
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_mongo_error)?
            .map(Profile::try_from)
            .transpose()
    }

    async fn find_by_id_and_update(
        &self,
        id: &ProfileId,
        patch: &ProfilePatch,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        self.profiles
            .find_one_and_update(doc! { "_id": object_id(id)? }, patch_update(patch))
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .map(Profile::try_from)
            .transpose()
    }

    async fn find_by_id_and_delete(
        &self,
        id: &ProfileId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        self.profiles
            .find_one_and_delete(doc! { "_id": object_id(id)? })
            .await
            .map_err(map_mongo_error)?
            .map(Profile::try_from)
            .transpose()
    }
}
