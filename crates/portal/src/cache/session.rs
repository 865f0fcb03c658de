use crate::abstract_trait::DynKeyValueStore;
use parking_lot::RwLock;
use shared::{
    config::TokenInspector,
    errors::{AuthError, StorageError},
    model::{Session, SessionSnapshot, User},
};
use tracing::{debug, error, info, warn};

pub const TOKEN_SLOT: &str = "token";
pub const REFRESH_TOKEN_SLOT: &str = "refreshToken";
pub const USER_SLOT: &str = "user";

const ALL_SLOTS: [&str; 3] = [TOKEN_SLOT, REFRESH_TOKEN_SLOT, USER_SLOT];

#[derive(Debug)]
struct SessionState {
    initializing: bool,
    session: Option<Session>,
    generation: u64,
}

/// Holder of the one current session.
///
/// Owned by the application root and shared by `Arc`. Every write goes to
/// storage first and only then to memory, so a failed write leaves the
/// in-memory session exactly as it was.
#[derive(Debug)]
pub struct SessionStore {
    storage: DynKeyValueStore,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(storage: DynKeyValueStore) -> Self {
        Self {
            storage,
            state: RwLock::new(SessionState {
                initializing: true,
                session: None,
                generation: 0,
            }),
        }
    }

    /// Restore the persisted session, or wipe storage if there is nothing
    /// usable in it.
    pub fn init(&self) {
        let mut state = self.state.write();

        match self.load() {
            Some(session) => {
                info!(
                    user_id = %session.user.id,
                    role = %session.user.role,
                    "Restored persisted session"
                );
                state.session = Some(session);
            }
            None => {
                if let Err(e) = self.storage.remove_many(&ALL_SLOTS) {
                    error!("Failed to wipe persisted session: {e}");
                }
                state.session = None;
            }
        }

        state.generation += 1;
        state.initializing = false;
    }

    fn load(&self) -> Option<Session> {
        let token = match self.storage.get(TOKEN_SLOT) {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                debug!("No persisted token");
                return None;
            }
            Err(e) => {
                error!("Failed to read persisted token: {e}");
                return None;
            }
        };

        if TokenInspector::is_expired(&token) {
            info!("Persisted token is expired or unreadable; starting signed out");
            return None;
        }

        let user = match self.storage.get(USER_SLOT) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Persisted user record is unreadable: {e}");
                    return None;
                }
            },
            Ok(None) => {
                warn!("Persisted token has no user record");
                return None;
            }
            Err(e) => {
                error!("Failed to read persisted user: {e}");
                return None;
            }
        };

        if user.is_blocked {
            warn!(user_id = %user.id, "Persisted user is blocked; discarding session");
            return None;
        }

        let refresh_token = self.storage.get(REFRESH_TOKEN_SLOT).ok().flatten();

        Some(Session::new(token, user).with_refresh_token(refresh_token))
    }

    pub fn is_initializing(&self) -> bool {
        self.state.read().initializing
    }

    pub fn get(&self) -> SessionSnapshot {
        match &self.state.read().session {
            Some(session) => SessionSnapshot::from(session),
            None => SessionSnapshot::unauthenticated(),
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.state.read().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().session.as_ref().map(|s| s.token.clone())
    }

    /// Value for the `Authorization` header of downstream requests.
    pub fn bearer_header(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }

    /// Bumped on every save and clear. Callers capture it before a network
    /// call and hand it back to `save_if_current`.
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Replace the current session wholesale.
    pub fn save(&self, session: Session) -> Result<(), AuthError> {
        let mut state = self.state.write();
        self.commit(&mut state, session)
    }

    /// Like `save`, but refuses when anything saved or cleared the session
    /// since `expected` was read.
    pub fn save_if_current(&self, expected: u64, session: Session) -> Result<(), AuthError> {
        let mut state = self.state.write();
        if state.generation != expected {
            warn!(
                expected,
                current = state.generation,
                "Discarding stale login response"
            );
            return Err(AuthError::Superseded);
        }
        self.commit(&mut state, session)
    }

    fn commit(&self, state: &mut SessionState, session: Session) -> Result<(), AuthError> {
        if session.user.is_blocked {
            return Err(AuthError::blocked());
        }

        self.persist(&session)?;

        debug!(user_id = %session.user.id, "Session saved");
        state.session = Some(session);
        state.generation += 1;
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.write_batch(&[
            (TOKEN_SLOT, Some(session.token.clone())),
            (REFRESH_TOKEN_SLOT, session.refresh_token.clone()),
            (USER_SLOT, Some(user)),
        ])
    }

    /// Forget the session. Safe to call any number of times.
    ///
    /// Memory is cleared even when storage fails.
    pub fn clear(&self) -> Result<(), AuthError> {
        let mut state = self.state.write();
        let removed = self.storage.remove_many(&ALL_SLOTS);

        if state.session.take().is_some() {
            info!("Session cleared");
        }
        state.generation += 1;

        removed.map_err(|e| {
            error!("Failed to remove persisted session: {e}");
            AuthError::from(e)
        })
    }
}
