use crate::{abstract_trait::DynIdentityClient, cache::SessionStore};
use shared::{
    domain::{
        requests::{LoginRequest, OwnerLoginRequest, SignupRequest},
        responses::SignupResponse,
    },
    errors::{AuthError, HttpError},
    model::{Session, User},
    utils::format_validation_errors,
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Result of a successful owner login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLogin {
    pub user: User,
    pub property_count: u32,
}

/// Trades credentials for a session and hands it to the session store.
///
/// Any failure, including a blocked account or a response that arrives after
/// the session was cleared, leaves the store untouched.
pub struct CredentialExchange {
    identity: DynIdentityClient,
    session: Arc<SessionStore>,
}

impl CredentialExchange {
    pub fn new(identity: DynIdentityClient, session: Arc<SessionStore>) -> Self {
        Self { identity, session }
    }

    pub async fn password_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let generation = self.session.generation();
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        info!(email = %request.email, "Password login");

        let response = self
            .identity
            .login(&request)
            .await
            .map_err(password_login_error)?;

        self.commit(generation, response.into_session())
    }

    pub async fn owner_login(&self, national_id: &str) -> Result<OwnerLogin, AuthError> {
        let request = OwnerLoginRequest {
            national_id: national_id.trim().to_string(),
        };
        request
            .validate()
            .map_err(|e| AuthError::Validation(format_validation_errors(&e)))?;

        let generation = self.session.generation();
        info!("Owner login");

        let response = self
            .identity
            .owner_login(&request)
            .await
            .map_err(owner_login_error)?;

        let (session, property_count) = response.into_session();
        let user = self.commit(generation, session)?;

        Ok(OwnerLogin {
            user,
            property_count,
        })
    }

    /// Create an account. Never touches the session.
    pub async fn signup(&self, profile: &SignupRequest) -> Result<SignupResponse, AuthError> {
        profile
            .validate()
            .map_err(|e| AuthError::Validation(format_validation_errors(&e)))?;

        info!(email = %profile.email, role = %profile.role, "Signup");

        self.identity.signup(profile).await.map_err(signup_error)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        info!("Logout");
        self.session.clear()
    }

    fn commit(&self, generation: u64, session: Session) -> Result<User, AuthError> {
        if session.user.is_blocked {
            warn!(user_id = %session.user.id, "Login succeeded for a blocked account; discarding");
            return Err(AuthError::blocked());
        }

        let user = session.user.clone();
        self.session.save_if_current(generation, session)?;

        info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }
}

fn password_login_error(err: HttpError) -> AuthError {
    match err {
        HttpError::BadRequest(m) | HttpError::Unauthorized(m) => AuthError::InvalidCredentials(m),
        HttpError::Forbidden(m) => AuthError::AccountBlocked(m),
        other => AuthError::NetworkOrServer(other.to_string()),
    }
}

fn owner_login_error(err: HttpError) -> AuthError {
    match err {
        HttpError::Unauthorized(m) | HttpError::Forbidden(m) | HttpError::NotFound(m) => {
            AuthError::NotFoundOrUnauthorized(m)
        }
        HttpError::BadRequest(m) => AuthError::Validation(vec![m]),
        other => AuthError::NetworkOrServer(other.to_string()),
    }
}

fn signup_error(err: HttpError) -> AuthError {
    match err {
        HttpError::BadRequest(m) | HttpError::Conflict(m) => AuthError::Validation(vec![m]),
        other => AuthError::NetworkOrServer(other.to_string()),
    }
}
