//! OpenAPI schema definitions for domain types.
//!
//! Domain enums stay free of `ToSchema`; these wrappers describe them for
//! the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Gender`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Gender)]
pub enum GenderSchema {
    #[schema(rename = "male")]
    Male,
    #[schema(rename = "female")]
    Female,
    #[schema(rename = "other")]
    Other,
}

/// OpenAPI schema for [`crate::domain::InterestedIn`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InterestedIn)]
pub enum InterestedInSchema {
    #[schema(rename = "male")]
    Male,
    #[schema(rename = "female")]
    Female,
    #[schema(rename = "both")]
    Both,
}
