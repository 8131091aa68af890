//! Portal client wiring.

use std::sync::Arc;

use crate::api::{AuthApi, ChatApi, CurriculaApi, RoadmapApi, SubjectsApi, SyllabiApi};
use crate::auth::{REFRESH_PATH, SessionRefresher, TokenStore};
use crate::crud::CrudClient;
use crate::dispatch::{DispatcherConfig, RequestDispatcher};
use crate::ports::{HttpTransport, SessionRepository};

/// Entry point to every portal API, sharing one token store and transport.
#[derive(Clone)]
pub struct PortalClient {
    crud: CrudClient,
    sessions: Option<Arc<dyn SessionRepository>>,
}

impl PortalClient {
    /// Creates a client. Refreshes go through a [`SessionRefresher`] that
    /// posts to the portal's refresh endpoint.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: TokenStore,
        config: DispatcherConfig,
        sessions: Option<Arc<dyn SessionRepository>>,
    ) -> Self {
        let mut refresher =
            SessionRefresher::new(Arc::clone(&transport), store.clone(), config.url_for(REFRESH_PATH));
        if let Some(sessions) = &sessions {
            refresher = refresher.with_session_repository(Arc::clone(sessions));
        }
        let dispatcher = RequestDispatcher::new(transport, store, Arc::new(refresher), config);
        Self {
            crud: CrudClient::new(dispatcher),
            sessions,
        }
    }

    /// The shared token store.
    #[must_use]
    pub fn store(&self) -> &TokenStore {
        self.crud.dispatcher().store()
    }

    /// Raw CRUD access for endpoints without a dedicated API.
    #[must_use]
    pub const fn crud(&self) -> &CrudClient {
        &self.crud
    }

    /// Sign-in and session management.
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.crud.clone(), self.sessions.clone())
    }

    /// Subject catalogue.
    #[must_use]
    pub fn subjects(&self) -> SubjectsApi {
        SubjectsApi::new(self.crud.clone())
    }

    /// Syllabi and assessments.
    #[must_use]
    pub fn syllabi(&self) -> SyllabiApi {
        SyllabiApi::new(self.crud.clone())
    }

    /// Curricula.
    #[must_use]
    pub fn curricula(&self) -> CurriculaApi {
        CurriculaApi::new(self.crud.clone())
    }

    /// Student roadmaps.
    #[must_use]
    pub fn roadmap(&self) -> RoadmapApi {
        RoadmapApi::new(self.crud.clone())
    }

    /// AI tutor chat.
    #[must_use]
    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.crud.clone())
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("crud", &self.crud)
            .field("persistent", &self.sessions.is_some())
            .finish()
    }
}
