use crate::{
    abstract_trait::DynNavigator,
    cache::SessionStore,
    middleware::redirect::{Decision, area_roles, resolve},
};
use shared::model::Role;
use std::sync::Arc;
use tracing::{debug, info};

/// A navigation to a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub required_roles: Option<Vec<Role>>,
}

impl NavigationRequest {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_roles: None,
        }
    }

    pub fn requiring(mut self, roles: &[Role]) -> Self {
        self.required_roles = Some(roles.to_vec());
        self
    }

    /// Require whatever role the path's area is meant for.
    pub fn for_area(path: impl Into<String>) -> Self {
        let path = path.into();
        let roles = area_roles(&path);
        Self::to(path).requiring(roles)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The session store has not finished restoring; show a spinner.
    Loading,
    Render,
    Redirected(String),
    AccessDenied,
}

/// Gate in front of every protected view.
pub struct RouteGuard {
    session: Arc<SessionStore>,
    navigator: DynNavigator,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionStore>, navigator: DynNavigator) -> Self {
        Self { session, navigator }
    }

    pub fn check(&self, request: &NavigationRequest) -> GuardOutcome {
        if self.session.is_initializing() {
            debug!(path = %request.path, "Session still initializing");
            return GuardOutcome::Loading;
        }

        let snapshot = self.session.get();
        let decision = resolve(
            &request.path,
            snapshot.is_authenticated,
            snapshot.role(),
            request.required_roles.as_deref(),
        );

        match decision {
            Decision::Allow => GuardOutcome::Render,
            Decision::RedirectTo(target) => {
                info!(from = %request.path, to = %target, "Redirecting");
                self.navigator.navigate(&target);
                GuardOutcome::Redirected(target)
            }
            Decision::Deny => {
                info!(path = %request.path, "Access denied");
                GuardOutcome::AccessDenied
            }
        }
    }
}
