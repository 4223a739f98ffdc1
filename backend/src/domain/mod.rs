//! Domain types and use-cases for dating profiles.
//!
//! Purpose: keep validation, timestamps, and error classification
//! independent of the HTTP transport and the document store.
//!
//! Public surface:
//! - [`Profile`], [`ProfileFields`], [`ProfileDraft`], [`ProfilePatch`] and
//!   their value types.
//! - [`ProfileService`], implementing the profile driving ports.
//! - [`Error`] / [`ErrorCode`], the transport-agnostic failure type.
//! - [`TraceId`], the request-scoped correlation id.

pub mod auth;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    Age, FieldInput, Gender, InterestedIn, NewProfile, PROFILE_ID_LEN, Profile, ProfileDraft,
    ProfileFields, ProfileId, ProfilePatch, ProfileValidationError,
};
pub use self::profile_service::{
    PROFILE_EXISTS, PROFILE_NOT_FOUND, ProfileOperation, ProfileService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
