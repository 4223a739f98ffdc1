//! Dating profile aggregate and its validation rules.
//!
//! A [`Profile`] is the only persisted entity. User-supplied attributes live
//! in [`ProfileFields`], built through [`ProfileDraft`] so the age range and
//! enumerated values are checked before anything reaches a repository.
//! Updates travel as a [`ProfilePatch`] holding only the keys a client sent. The identifier and `created_at` are owned by the store and the
//! service respectively and never change after creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation failures raised while building profile fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    /// Create was called without a usable name or age.
    #[error("Name and age are required")]
    MissingRequired,
    /// An update tried to clear a required field.
    #[error("{field} is required")]
    RequiredFieldCleared { field: &'static str },
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The age was not a whole number.
    #[error("age must be a whole number")]
    InvalidAge,
    /// The age fell outside the accepted range.
    #[error("age must be between {min} and {max}", min = Age::MIN, max = Age::MAX)]
    AgeOutOfRange { value: i64 },
    /// The gender was not one of the accepted values.
    #[error("gender must be one of male, female, other")]
    InvalidGender { value: String },
    /// The interested-in preference was not one of the accepted values.
    #[error("interestedIn must be one of male, female, both")]
    InvalidInterestedIn { value: String },
    /// A text field received a structured value.
    #[error("{field} must be text")]
    InvalidText { field: &'static str },
    /// The identifier is not a 24-digit hexadecimal string.
    #[error("profile id must be a 24-character hexadecimal string")]
    InvalidId,
}

impl ProfileValidationError {
    /// Wire name of the offending field, when the failure concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequired => None,
            Self::RequiredFieldCleared { field } | Self::InvalidText { field } => Some(*field),
            Self::EmptyName => Some("name"),
            Self::InvalidAge | Self::AgeOutOfRange { .. } => Some("age"),
            Self::InvalidGender { .. } => Some("gender"),
            Self::InvalidInterestedIn { .. } => Some("interestedIn"),
            Self::InvalidId => Some("id"),
        }
    }

    /// Stable snake-case code reported alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::RequiredFieldCleared { .. } => "required_field_cleared",
            Self::EmptyName => "empty_name",
            Self::InvalidAge => "invalid_age",
            Self::AgeOutOfRange { .. } => "age_out_of_range",
            Self::InvalidGender { .. } => "invalid_gender",
            Self::InvalidInterestedIn { .. } => "invalid_interested_in",
            Self::InvalidText { .. } => "invalid_text",
            Self::InvalidId => "invalid_id",
        }
    }
}

impl From<ProfileValidationError> for crate::domain::Error {
    fn from(err: ProfileValidationError) -> Self {
        let details = serde_json::json!({
            "field": err.field(),
            "code": err.code(),
        });
        Self::invalid_request(err.to_string()).with_details(details)
    }
}

/// Store-generated profile identifier.
///
/// Identifiers are 24 lowercase hexadecimal digits, the textual form of a
/// document-store object id. Uppercase input is normalised.
///
/// # Examples
/// ```
/// use backend::domain::ProfileId;
///
/// let id = ProfileId::new("65F1C0FFEE0000000000ABCD").expect("valid id");
/// assert_eq!(id.as_ref(), "65f1c0ffee0000000000abcd");
/// assert!(ProfileId::new("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

/// Number of hexadecimal digits in a [`ProfileId`].
pub const PROFILE_ID_LEN: usize = 24;

impl ProfileId {
    /// Validate and construct a [`ProfileId`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let raw = raw.as_ref();
        if raw.len() != PROFILE_ID_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ProfileValidationError::InvalidId);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProfileId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years, always within `[Age::MIN, Age::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(u8);

impl Age {
    /// Youngest accepted age.
    pub const MIN: u8 = 18;
    /// Oldest accepted age.
    pub const MAX: u8 = 100;

    /// Validate and construct an [`Age`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Age;
    ///
    /// assert_eq!(Age::new(30).map(Age::get), Ok(30));
    /// assert!(Age::new(17).is_err());
    /// assert!(Age::new(101).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ProfileValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|years| (Self::MIN..=Self::MAX).contains(years))
            .map(Self)
            .ok_or(ProfileValidationError::AgeOutOfRange { value })
    }

    /// Age in years.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<Age> for i64 {
    fn from(value: Age) -> Self {
        Self::from(value.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = ProfileValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Gender declared on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Stored string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(ProfileValidationError::InvalidGender {
                value: other.to_owned(),
            }),
        }
    }
}

/// Which genders the profile owner is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestedIn {
    Male,
    Female,
    Both,
}

impl InterestedIn {
    /// Stored string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for InterestedIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InterestedIn {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "both" => Ok(Self::Both),
            other => Err(ProfileValidationError::InvalidInterestedIn {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated user-supplied profile attributes.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `age` is within `[18, 100]`.
/// - Optional text fields are `None` rather than blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub name: String,
    pub age: Age,
    pub dob: Option<String>,
    pub location: Option<String>,
    pub occupation: Option<String>,
    pub hobbies: Vec<String>,
    pub relationship_goals: Option<String>,
    pub lifestyle: Option<String>,
    pub religion: Option<String>,
    pub height: Option<String>,
    pub gender: Option<Gender>,
    pub languages: Option<String>,
    pub interested_in: Option<InterestedIn>,
    pub profile_note: Option<String>,
    pub profile_photo: Option<String>,
}

impl ProfileFields {
    /// Minimal field set with only the required attributes.
    pub fn new(name: impl Into<String>, age: Age) -> Result<Self, ProfileValidationError> {
        let name = normalise_name(name.into())?;
        Ok(Self {
            name,
            age,
            dob: None,
            location: None,
            occupation: None,
            hobbies: Vec::new(),
            relationship_goals: None,
            lifestyle: None,
            religion: None,
            height: None,
            gender: None,
            languages: None,
            interested_in: None,
            profile_note: None,
            profile_photo: None,
        })
    }
}

fn normalise_name(name: String) -> Result<String, ProfileValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// Persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    fields: ProfileFields,
    created_at: DateTime<Utc>,
}

impl Profile {
    /// Rehydrate a profile from stored components.
    #[must_use]
    pub fn new(id: ProfileId, fields: ProfileFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Store-generated identifier.
    #[must_use]
    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    /// User-supplied attributes.
    #[must_use]
    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the user-supplied attributes, keeping identity and timestamp.
    #[must_use]
    pub fn with_fields(self, fields: ProfileFields) -> Self {
        Self { fields, ..self }
    }

    /// Split into identifier, fields, and creation timestamp.
    #[must_use]
    pub fn into_parts(self) -> (ProfileId, ProfileFields, DateTime<Utc>) {
        (self.id, self.fields, self.created_at)
    }
}

/// A profile about to be inserted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub fields: ProfileFields,
    pub created_at: DateTime<Utc>,
}

/// Tri-state value for a single field of an incoming payload.
///
/// `Absent` means the key was not sent, `Null` means it was sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldInput<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> FieldInput<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    fn merge(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Absent => current,
            Self::Null => None,
            Self::Value(value) => Some(value),
        }
    }

    /// Whether the key was sent at all.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the carried value, keeping the tri-state.
    #[must_use]
    pub fn borrowed(&self) -> FieldInput<&T> {
        match self {
            Self::Absent => FieldInput::Absent,
            Self::Null => FieldInput::Null,
            Self::Value(value) => FieldInput::Value(value),
        }
    }

    /// Transform the carried value, keeping the tri-state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldInput<U> {
        match self {
            Self::Absent => FieldInput::Absent,
            Self::Null => FieldInput::Null,
            Self::Value(value) => FieldInput::Value(f(value)),
        }
    }
}

/// Unvalidated profile payload as received from a client.
///
/// Inbound adapters decode their wire format into a draft; the domain turns
/// it into [`ProfileFields`] for a create, or into a [`ProfilePatch`] for an
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub name: FieldInput<String>,
    pub age: FieldInput<i64>,
    pub dob: FieldInput<String>,
    pub location: FieldInput<String>,
    pub occupation: FieldInput<String>,
    pub hobbies: FieldInput<Vec<String>>,
    pub relationship_goals: FieldInput<String>,
    pub lifestyle: FieldInput<String>,
    pub religion: FieldInput<String>,
    pub height: FieldInput<String>,
    pub gender: FieldInput<String>,
    pub languages: FieldInput<String>,
    pub interested_in: FieldInput<String>,
    pub profile_note: FieldInput<String>,
    pub profile_photo: FieldInput<String>,
}

impl ProfileDraft {
    /// Validate a draft for a brand-new profile.
    ///
    /// A missing, blank or zero age counts as absent, as does a blank name.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FieldInput, ProfileDraft, ProfileValidationError};
    ///
    /// let draft = ProfileDraft {
    ///     name: FieldInput::Value("Alice".to_owned()),
    ///     ..ProfileDraft::default()
    /// };
    /// assert_eq!(
    ///     draft.into_new_fields(),
    ///     Err(ProfileValidationError::MissingRequired)
    /// );
    /// ```
    pub fn into_new_fields(self) -> Result<ProfileFields, ProfileValidationError> {
        let name = self
            .name
            .clone()
            .into_option()
            .filter(|name| !name.trim().is_empty());
        let age = self.age.clone().into_option().filter(|age| *age != 0);
        let (Some(name), Some(age)) = (name, age) else {
            return Err(ProfileValidationError::MissingRequired);
        };
        let required = ProfileFields::new(name, Age::new(age)?)?;
        Ok(self.into_patch()?.apply_to(required))
    }

    /// Validate the keys present in a draft as a partial update.
    ///
    /// Every rule applies to one field at a time, so the patch can be checked
    /// without the stored record and handed to the store in a single write.
    /// Required fields cannot be cleared.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FieldInput, ProfileDraft};
    ///
    /// let draft = ProfileDraft {
    ///     location: FieldInput::Value("  ".to_owned()),
    ///     ..ProfileDraft::default()
    /// };
    /// let patch = draft.into_patch().expect("valid patch");
    /// assert_eq!(patch.location, FieldInput::Null);
    /// assert!(patch.name.is_none());
    /// ```
    pub fn into_patch(self) -> Result<ProfilePatch, ProfileValidationError> {
        let name = match self.name {
            FieldInput::Absent => None,
            FieldInput::Null => {
                return Err(ProfileValidationError::RequiredFieldCleared { field: "name" });
            }
            FieldInput::Value(name) => Some(normalise_name(name)?),
        };
        let age = match self.age {
            FieldInput::Absent => None,
            FieldInput::Null => {
                return Err(ProfileValidationError::RequiredFieldCleared { field: "age" });
            }
            FieldInput::Value(age) => Some(Age::new(age)?),
        };

        Ok(ProfilePatch {
            name,
            age,
            dob: patch_text(self.dob),
            location: patch_text(self.location),
            occupation: patch_text(self.occupation),
            hobbies: patch_hobbies(self.hobbies),
            relationship_goals: patch_text(self.relationship_goals),
            lifestyle: patch_text(self.lifestyle),
            religion: patch_text(self.religion),
            height: patch_text(self.height),
            gender: patch_choice(self.gender)?,
            languages: patch_text(self.languages),
            interested_in: patch_choice(self.interested_in)?,
            profile_note: patch_text(self.profile_note),
            profile_photo: patch_text(self.profile_photo),
        })
    }
}

/// Validated partial update of a profile.
///
/// Only keys the client sent are present. `Null` clears an optional field;
/// blank text and empty hobby lists are normalised to `Null`, so every
/// `Value` is non-blank. Stores apply a patch atomically against whatever
/// is stored at write time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<Age>,
    pub dob: FieldInput<String>,
    pub location: FieldInput<String>,
    pub occupation: FieldInput<String>,
    pub hobbies: FieldInput<Vec<String>>,
    pub relationship_goals: FieldInput<String>,
    pub lifestyle: FieldInput<String>,
    pub religion: FieldInput<String>,
    pub height: FieldInput<String>,
    pub gender: FieldInput<Gender>,
    pub languages: FieldInput<String>,
    pub interested_in: FieldInput<InterestedIn>,
    pub profile_note: FieldInput<String>,
    pub profile_photo: FieldInput<String>,
}

impl ProfilePatch {
    /// Whether the patch touches no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.dob.is_absent()
            && self.location.is_absent()
            && self.occupation.is_absent()
            && self.hobbies.is_absent()
            && self.relationship_goals.is_absent()
            && self.lifestyle.is_absent()
            && self.religion.is_absent()
            && self.height.is_absent()
            && self.gender.is_absent()
            && self.languages.is_absent()
            && self.interested_in.is_absent()
            && self.profile_note.is_absent()
            && self.profile_photo.is_absent()
    }

    /// Apply the patch over `fields`, keeping every absent key.
    #[must_use]
    pub fn apply_to(self, fields: ProfileFields) -> ProfileFields {
        let hobbies = match self.hobbies {
            FieldInput::Absent => fields.hobbies,
            FieldInput::Null => Vec::new(),
            FieldInput::Value(values) => values,
        };
        ProfileFields {
            name: self.name.unwrap_or(fields.name),
            age: self.age.unwrap_or(fields.age),
            dob: self.dob.merge(fields.dob),
            location: self.location.merge(fields.location),
            occupation: self.occupation.merge(fields.occupation),
            hobbies,
            relationship_goals: self.relationship_goals.merge(fields.relationship_goals),
            lifestyle: self.lifestyle.merge(fields.lifestyle),
            religion: self.religion.merge(fields.religion),
            height: self.height.merge(fields.height),
            gender: self.gender.merge(fields.gender),
            languages: self.languages.merge(fields.languages),
            interested_in: self.interested_in.merge(fields.interested_in),
            profile_note: self.profile_note.merge(fields.profile_note),
            profile_photo: self.profile_photo.merge(fields.profile_photo),
        }
    }
}

fn patch_text(input: FieldInput<String>) -> FieldInput<String> {
    match input {
        FieldInput::Value(text) if text.trim().is_empty() => FieldInput::Null,
        other => other.map(|text| text.trim().to_owned()),
    }
}

fn patch_hobbies(input: FieldInput<Vec<String>>) -> FieldInput<Vec<String>> {
    match input {
        FieldInput::Value(values) => {
            let hobbies: Vec<String> = values
                .into_iter()
                .map(|hobby| hobby.trim().to_owned())
                .filter(|hobby| !hobby.is_empty())
                .collect();
            if hobbies.is_empty() {
                FieldInput::Null
            } else {
                FieldInput::Value(hobbies)
            }
        }
        other => other,
    }
}

fn patch_choice<T>(input: FieldInput<String>) -> Result<FieldInput<T>, ProfileValidationError>
where
    T: std::str::FromStr<Err = ProfileValidationError>,
{
    match input {
        FieldInput::Absent => Ok(FieldInput::Absent),
        FieldInput::Null => Ok(FieldInput::Null),
        FieldInput::Value(raw) if raw.trim().is_empty() => Ok(FieldInput::Null),
        FieldInput::Value(raw) => raw.trim().parse().map(FieldInput::Value),
    }
}
