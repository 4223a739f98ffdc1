//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be exercised against mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ProfileCommand, ProfileQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ProfileService;
    /// use backend::domain::ports::FixtureLoginService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::persistence::InMemoryProfileRepository;
    ///
    /// let service = Arc::new(ProfileService::new(
    ///     Arc::new(InMemoryProfileRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service, Arc::new(FixtureLoginService));
    /// let _query = state.profiles_query.clone();
    /// ```
    pub fn new(
        profiles: Arc<dyn ProfileCommand>,
        profiles_query: Arc<dyn ProfileQuery>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            profiles,
            profiles_query,
            login,
        }
    }
}
