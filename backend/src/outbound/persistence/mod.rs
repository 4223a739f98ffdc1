//! Profile persistence adapters.
//!
//! [`MongoProfileRepository`] stores profiles in a MongoDB collection through
//! a pooled [`MongoStore`] client. [`InMemoryProfileRepository`] keeps them in
//! process memory for local development and tests. Both generate ObjectId
//! identifiers and apply the same ordering, so callers cannot tell them
//! apart.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{MongoConfig, MongoProfileRepository, MongoStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017").with_database("dating_app");
//! let store = MongoStore::connect(&config).await?;
//! let repo = MongoProfileRepository::new(&store);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod client;
mod documents;
mod in_memory_profile_repository;
mod mongo_error_mapping;
mod mongo_profile_repository;

pub use client::{DEFAULT_DATABASE, MongoConfig, MongoStore, StoreError};
pub use in_memory_profile_repository::InMemoryProfileRepository;
pub use mongo_profile_repository::{MongoProfileRepository, PROFILES_COLLECTION};
