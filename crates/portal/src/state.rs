use crate::{
    abstract_trait::DynNavigator,
    cache::SessionStore,
    di::DependenciesInject,
    middleware::{LoginPortal, RouteGuard},
    service::CredentialExchange,
};
use anyhow::Result;
use shared::config::Config;
use std::sync::Arc;
use tracing::info;

/// Application root. Owns the one session store and hands it to everything
/// that needs it.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub exchange: Arc<CredentialExchange>,
    pub portal: Arc<LoginPortal>,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    pub fn new(config: &Config, navigator: DynNavigator) -> Result<Self> {
        let deps = DependenciesInject::new(config, navigator)?;
        Ok(Self::from_deps(deps))
    }

    /// Wire everything without touching storage. Call `start` afterwards.
    pub fn from_deps(deps: DependenciesInject) -> Self {
        let DependenciesInject {
            identity,
            storage,
            navigator,
        } = deps;

        let session = Arc::new(SessionStore::new(storage));
        let exchange = Arc::new(CredentialExchange::new(identity, session.clone()));
        let portal = Arc::new(LoginPortal::new(exchange.clone(), session.clone()));
        let guard = Arc::new(RouteGuard::new(session.clone(), navigator));

        Self {
            session,
            exchange,
            portal,
            guard,
        }
    }

    /// Restore the persisted session.
    pub fn start(&self) {
        self.session.init();
        info!(
            authenticated = self.session.get().is_authenticated,
            "Session store ready"
        );
    }
}
