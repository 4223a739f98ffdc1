//! BSON representation of stored profiles.
//!
//! Field names follow the camelCase keys existing collections already use,
//! including `createdAt`. Optional fields are omitted rather than stored as
//! `null`, and unknown keys such as `__v` are ignored on read.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ProfileRepositoryError;
use crate::domain::{Age, FieldInput, Profile, ProfileFields, ProfileId, ProfilePatch};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FieldsDocument {
    name: String,
    age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hobbies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relationship_goals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lifestyle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    languages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interested_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ProfileDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    fields: FieldsDocument,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

impl From<&ProfileFields> for FieldsDocument {
    fn from(fields: &ProfileFields) -> Self {
        Self {
            name: fields.name.clone(),
            age: i32::from(fields.age.get()),
            dob: fields.dob.clone(),
            location: fields.location.clone(),
            occupation: fields.occupation.clone(),
            hobbies: fields.hobbies.clone(),
            relationship_goals: fields.relationship_goals.clone(),
            lifestyle: fields.lifestyle.clone(),
            religion: fields.religion.clone(),
            height: fields.height.clone(),
            gender: fields.gender.map(|g| g.as_str().to_owned()),
            languages: fields.languages.clone(),
            interested_in: fields.interested_in.map(|i| i.as_str().to_owned()),
            profile_note: fields.profile_note.clone(),
            profile_photo: fields.profile_photo.clone(),
        }
    }
}

impl TryFrom<FieldsDocument> for ProfileFields {
    type Error = ProfileRepositoryError;

    fn try_from(doc: FieldsDocument) -> Result<Self, Self::Error> {
        let invalid = |err: crate::domain::ProfileValidationError| {
            ProfileRepositoryError::query(format!("stored profile is invalid: {err}"))
        };
        let age = Age::new(i64::from(doc.age)).map_err(invalid)?;
        let mut fields = ProfileFields::new(doc.name, age).map_err(invalid)?;
        fields.dob = doc.dob;
        fields.location = doc.location;
        fields.occupation = doc.occupation;
        fields.hobbies = doc.hobbies;
        fields.relationship_goals = doc.relationship_goals;
        fields.lifestyle = doc.lifestyle;
        fields.religion = doc.religion;
        fields.height = doc.height;
        fields.gender = doc.gender.map(|g| g.parse()).transpose().map_err(invalid)?;
        fields.languages = doc.languages;
        fields.interested_in = doc
            .interested_in
            .map(|i| i.parse())
            .transpose()
            .map_err(invalid)?;
        fields.profile_note = doc.profile_note;
        fields.profile_photo = doc.profile_photo;
        Ok(fields)
    }
}

impl ProfileDocument {
    pub(super) fn new(id: ObjectId, fields: &ProfileFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields: FieldsDocument::from(fields),
            created_at: bson::DateTime::from_millis(created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<ProfileDocument> for Profile {
    type Error = ProfileRepositoryError;

    fn try_from(doc: ProfileDocument) -> Result<Self, Self::Error> {
        let id = ProfileId::new(doc.id.to_hex())
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        let created_at = DateTime::from_timestamp_millis(doc.created_at.timestamp_millis())
            .ok_or_else(|| ProfileRepositoryError::query("stored createdAt is out of range"))?;
        Ok(Profile::new(id, ProfileFields::try_from(doc.fields)?, created_at))
    }
}

/// Convert a validated identifier into the store's native key.
pub(super) fn object_id(id: &ProfileId) -> Result<ObjectId, ProfileRepositoryError> {
    ObjectId::parse_str(id.as_ref()).map_err(|err| ProfileRepositoryError::query(err.to_string()))
}

/// Accumulates the `$set` and `$unset` halves of a patch update.
#[derive(Default)]
struct PatchUpdate {
    set: Document,
    unset: Document,
}

impl PatchUpdate {
    fn field<T: Into<Bson>>(&mut self, key: &str, input: FieldInput<T>) {
        match input {
            FieldInput::Absent => {}
            FieldInput::Null => {
                self.unset.insert(key, "");
            }
            FieldInput::Value(value) => {
                self.set.insert(key, value);
            }
        }
    }

    fn into_document(self) -> Document {
        let mut update = Document::new();
        if !self.set.is_empty() {
            update.insert("$set", self.set);
        }
        if !self.unset.is_empty() {
            update.insert("$unset", self.unset);
        }
        update
    }
}

fn text(input: &FieldInput<String>) -> FieldInput<&str> {
    input.borrowed().map(String::as_str)
}

/// Build a `$set`/`$unset` update touching only the keys present in `patch`.
///
/// Cleared optional fields are removed from the document, matching how
/// [`FieldsDocument`] omits them on insert. An empty patch yields an empty
/// document, which the store rejects; callers must not send it.
pub(super) fn patch_update(patch: &ProfilePatch) -> Document {
    let mut update = PatchUpdate::default();
    if let Some(name) = &patch.name {
        update.set.insert("name", name.as_str());
    }
    if let Some(age) = patch.age {
        update.set.insert("age", i32::from(age.get()));
    }
    update.field("dob", text(&patch.dob));
    update.field("location", text(&patch.location));
    update.field("occupation", text(&patch.occupation));
    update.field("hobbies", patch.hobbies.clone());
    update.field("relationshipGoals", text(&patch.relationship_goals));
    update.field("lifestyle", text(&patch.lifestyle));
    update.field("religion", text(&patch.religion));
    update.field("height", text(&patch.height));
    update.field("gender", patch.gender.clone().map(|g| g.as_str()));
    update.field("languages", text(&patch.languages));
    update.field("interestedIn", patch.interested_in.clone().map(|i| i.as_str()));
    update.field("profileNote", text(&patch.profile_note));
    update.field("profilePhoto", text(&patch.profile_photo));
    update.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, InterestedIn};
    use mongodb::bson::doc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fields() -> ProfileFields {
        let mut fields =
            ProfileFields::new("Alice", Age::new(30).expect("age")).expect("name");
        fields.gender = Some(Gender::Female);
        fields.hobbies = vec!["chess".to_owned()];
        fields
    }

    #[rstest]
    fn document_uses_wire_keys(fields: ProfileFields) {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_123).expect("timestamp");
        let doc = ProfileDocument::new(ObjectId::new(), &fields, created_at);
        let bson = bson::to_document(&doc).expect("serialise");

        assert!(bson.contains_key("_id"));
        assert!(bson.contains_key("createdAt"));
        assert_eq!(bson.get_str("gender"), Ok("female"));
        assert!(!bson.contains_key("location"));
    }

    #[rstest]
    fn legacy_documents_with_version_key_load() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "name": "Alice",
            "age": 30,
            "interestedIn": "both",
            "createdAt": bson::DateTime::from_millis(1_700_000_000_000),
            "__v": 0,
        };
        let doc: ProfileDocument = bson::from_document(raw).expect("deserialise");
        let profile = Profile::try_from(doc).expect("valid profile");

        assert_eq!(profile.id().as_ref(), oid.to_hex());
        assert_eq!(profile.created_at().timestamp_millis(), 1_700_000_000_000);
    }

    #[rstest]
    fn out_of_range_stored_age_is_a_query_error() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Old",
            "age": 140,
            "createdAt": bson::DateTime::now(),
        };
        let doc: ProfileDocument = bson::from_document(raw).expect("deserialise");
        assert!(matches!(
            Profile::try_from(doc),
            Err(ProfileRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn patch_sets_present_keys_and_unsets_cleared_ones() {
        let patch = ProfilePatch {
            age: Some(Age::new(31).expect("age")),
            location: FieldInput::Null,
            interested_in: FieldInput::Value(InterestedIn::Both),
            hobbies: FieldInput::Value(vec!["chess".to_owned()]),
            ..ProfilePatch::default()
        };

        let update = patch_update(&patch);

        let set = update.get_document("$set").expect("$set");
        let unset = update.get_document("$unset").expect("$unset");
        assert_eq!(set.get_i32("age"), Ok(31));
        assert_eq!(set.get_str("interestedIn"), Ok("both"));
        assert!(set.get_array("hobbies").is_ok());
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("occupation"));
        assert_eq!(unset.keys().map(String::as_str).collect::<Vec<_>>(), ["location"]);
    }

    #[rstest]
    fn set_only_patch_has_no_unset() {
        let patch = ProfilePatch {
            name: Some("Alicia".to_owned()),
            ..ProfilePatch::default()
        };

        let update = patch_update(&patch);

        assert_eq!(update, doc! { "$set": { "name": "Alicia" } });
    }
}
