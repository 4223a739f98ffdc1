//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`ProfileRepository`]) are implemented by outbound
//! adapters. Driving ports ([`ProfileCommand`], [`ProfileQuery`],
//! [`LoginService`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod profile_command;
mod profile_query;
mod profile_repository;

pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
