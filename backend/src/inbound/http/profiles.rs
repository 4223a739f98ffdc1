//! Profile API handlers.
//!
//! ```text
//! POST   /api/profile       {"name":"Alice","age":30}
//! GET    /api/profile
//! GET    /api/profile/{id}
//! PUT    /api/profile/{id}  {"location":"Lyon"}
//! DELETE /api/profile/{id}
//! ```
//!
//! Every response is a 200 envelope; see [`crate::inbound::http::envelope`].

use actix_web::{delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Gender, InterestedIn, Profile, ProfileDraft, ProfileValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{age_input, hobbies_input, present, text_input};

pub const PROFILE_SAVED: &str = "Profile saved successfully!";
pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PROFILE_DELETED: &str = "Profile deleted successfully!";

/// Profile payload for create and update.
///
/// Every field is optional at the transport level. Create requires `name`
/// and `age`; update merges whatever is present over the stored profile and
/// treats `null` as "clear". Unknown keys, `_id`, and `createdAt` are
/// ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Alice")]
    pub name: Option<Value>,
    /// Whole number between 18 and 100; numeric strings are accepted.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, example = 30)]
    pub age: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "1995-04-12")]
    pub dob: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Paris")]
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub occupation: Option<Value>,
    /// A list of strings, or a single string.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Vec<String>>)]
    pub hobbies: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub relationship_goals: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub lifestyle: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub religion: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub height: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<crate::inbound::http::schemas::GenderSchema>)]
    pub gender: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub languages: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<crate::inbound::http::schemas::InterestedInSchema>)]
    pub interested_in: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub profile_note: Option<Value>,
    /// Path or URL of an already uploaded photo.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub profile_photo: Option<Value>,
}

impl TryFrom<ProfileRequest> for ProfileDraft {
    type Error = ProfileValidationError;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: text_input("name", value.name)?,
            age: age_input(value.age)?,
            dob: text_input("dob", value.dob)?,
            location: text_input("location", value.location)?,
            occupation: text_input("occupation", value.occupation)?,
            hobbies: hobbies_input(value.hobbies)?,
            relationship_goals: text_input("relationshipGoals", value.relationship_goals)?,
            lifestyle: text_input("lifestyle", value.lifestyle)?,
            religion: text_input("religion", value.religion)?,
            height: text_input("height", value.height)?,
            gender: text_input("gender", value.gender)?,
            languages: text_input("languages", value.languages)?,
            interested_in: text_input("interestedIn", value.interested_in)?,
            profile_note: text_input("profileNote", value.profile_note)?,
            profile_photo: text_input("profilePhoto", value.profile_photo)?,
        })
    }
}

/// Stored profile as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    pub name: String,
    pub age: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub hobbies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<crate::inbound::http::schemas::GenderSchema>)]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<crate::inbound::http::schemas::InterestedInSchema>)]
    pub interested_in: Option<InterestedIn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    /// RFC 3339 timestamp with millisecond precision.
    #[schema(example = "2026-03-14T09:30:00.000Z")]
    pub created_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let (id, fields, created_at) = profile.into_parts();
        Self {
            id: id.into(),
            name: fields.name,
            age: fields.age.get(),
            dob: fields.dob,
            location: fields.location,
            occupation: fields.occupation,
            hobbies: fields.hobbies,
            relationship_goals: fields.relationship_goals,
            lifestyle: fields.lifestyle,
            religion: fields.religion,
            height: fields.height,
            gender: fields.gender,
            languages: fields.languages,
            interested_in: fields.interested_in,
            profile_note: fields.profile_note,
            profile_photo: fields.profile_photo,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Envelope for `POST /api/profile`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCreatedResponse {
    pub success: bool,
    #[schema(example = "Profile saved successfully!")]
    pub message: String,
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub profile_id: String,
}

/// Envelope for `GET /api/profile`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileListResponse {
    pub success: bool,
    /// Newest first.
    pub profiles: Vec<ProfileResponse>,
}

/// Envelope for `GET /api/profile/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileFetchedResponse {
    pub success: bool,
    pub profile: ProfileResponse,
}

/// Envelope for `PUT /api/profile/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    pub success: bool,
    #[schema(example = "Profile updated successfully!")]
    pub message: String,
    pub profile: ProfileResponse,
}

/// Create a profile.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile stored; failures use the Failure envelope", body = ProfileCreatedResponse),
    ),
    tags = ["profiles"],
    operation_id = "createProfile"
)]
#[post("/profile")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileCreatedResponse>> {
    let draft = ProfileDraft::try_from(payload.into_inner())?;
    let id = state.profiles.create(draft).await?;
    Ok(web::Json(ProfileCreatedResponse {
        success: true,
        message: PROFILE_SAVED.to_owned(),
        profile_id: id.into(),
    }))
}

/// List every profile, newest first.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "All profiles; failures use the Failure envelope", body = ProfileListResponse),
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/profile")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileListResponse>> {
    let profiles = state.profiles_query.list().await?;
    Ok(web::Json(ProfileListResponse {
        success: true,
        profiles: profiles.into_iter().map(ProfileResponse::from).collect(),
    }))
}

/// Fetch a single profile.
#[utoipa::path(
    get,
    path = "/api/profile/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    responses(
        (status = 200, description = "The profile, or a Failure envelope", body = ProfileFetchedResponse),
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profile/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileFetchedResponse>> {
    let profile = state.profiles_query.get(&path.into_inner()).await?;
    Ok(web::Json(ProfileFetchedResponse {
        success: true,
        profile: profile.into(),
    }))
}

/// Update a profile by merging the payload over the stored fields.
#[utoipa::path(
    put,
    path = "/api/profile/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "The updated profile, or a Failure envelope", body = ProfileUpdatedResponse),
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[put("/profile/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileUpdatedResponse>> {
    let draft = ProfileDraft::try_from(payload.into_inner())?;
    let profile = state.profiles.update(&path.into_inner(), draft).await?;
    Ok(web::Json(ProfileUpdatedResponse {
        success: true,
        message: PROFILE_UPDATED.to_owned(),
        profile: profile.into(),
    }))
}

/// Delete a profile.
#[utoipa::path(
    delete,
    path = "/api/profile/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    responses(
        (status = 200, description = "Deleted, or a Failure envelope", body = MessageResponse),
    ),
    tags = ["profiles"],
    operation_id = "deleteProfile"
)]
#[delete("/profile/{id}")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.profiles.delete(&path.into_inner()).await?;
    Ok(web::Json(MessageResponse::new(PROFILE_DELETED)))
}

#[cfg(test)]
mod tests;
