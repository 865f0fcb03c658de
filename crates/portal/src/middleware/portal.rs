use crate::{cache::SessionStore, service::CredentialExchange};
use shared::{errors::AuthError, model::Role};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{info, warn};

pub const ADMIN_ONLY_NOTICE: &str = "Access denied: this portal is for system administrators only";

/// The three login pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSurface {
    Admin,
    Staff,
    Owner,
}

impl LoginSurface {
    pub fn path(self) -> &'static str {
        self.expected_role().login_path()
    }

    pub fn expected_role(self) -> Role {
        match self {
            LoginSurface::Admin => Role::SystemAdmin,
            LoginSurface::Staff => Role::Manager,
            LoginSurface::Owner => Role::Owner,
        }
    }
}

/// Where the caller ends up after submitting a login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalOutcome {
    Navigate { to: String, notice: Option<String> },
    Stay { on: String, notice: String },
}

/// Clears the submit latch when the request finishes, however it finishes.
struct PendingSubmit<'a>(&'a AtomicBool);

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Post-login behaviour of the login pages.
///
/// The admin page revokes a freshly created session whose role is not
/// SystemAdmin; the staff page keeps any session and just sends the user to
/// their role's landing page.
pub struct LoginPortal {
    exchange: Arc<CredentialExchange>,
    session: Arc<SessionStore>,
    pending: AtomicBool,
}

impl LoginPortal {
    pub fn new(exchange: Arc<CredentialExchange>, session: Arc<SessionStore>) -> Self {
        Self {
            exchange,
            session,
            pending: AtomicBool::new(false),
        }
    }

    /// True while a login or logout is in flight; the submit control stays
    /// disabled until it clears.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<PendingSubmit<'_>, AuthError> {
        if self.pending.swap(true, Ordering::SeqCst) {
            return Err(AuthError::RequestPending);
        }
        Ok(PendingSubmit(&self.pending))
    }

    pub async fn admin_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PortalOutcome, AuthError> {
        let _pending = self.begin()?;
        let user = self.exchange.password_login(email, password).await?;

        if user.role != Role::SystemAdmin {
            warn!(
                user_id = %user.id,
                role = %user.role,
                "Non-admin signed in on the admin portal; revoking"
            );
            self.session.clear()?;
            return Ok(PortalOutcome::Stay {
                on: LoginSurface::Admin.path().to_string(),
                notice: ADMIN_ONLY_NOTICE.to_string(),
            });
        }

        Ok(PortalOutcome::Navigate {
            to: user.role.landing_path().to_string(),
            notice: None,
        })
    }

    pub async fn staff_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PortalOutcome, AuthError> {
        let _pending = self.begin()?;
        let user = self.exchange.password_login(email, password).await?;

        if user.role != LoginSurface::Staff.expected_role() {
            info!(role = %user.role, "Staff portal login by another role; redirecting to its area");
        }

        Ok(PortalOutcome::Navigate {
            to: user.role.landing_path().to_string(),
            notice: None,
        })
    }

    pub async fn owner_login(&self, national_id: &str) -> Result<PortalOutcome, AuthError> {
        let _pending = self.begin()?;
        let owner = self.exchange.owner_login(national_id).await?;

        let name = owner.user.full_name();
        let greeting = if name.is_empty() {
            "Welcome".to_string()
        } else {
            format!("Welcome, {name}")
        };

        Ok(PortalOutcome::Navigate {
            to: owner.user.role.landing_path().to_string(),
            notice: Some(format!(
                "{greeting}. You have {} registered properties.",
                owner.property_count
            )),
        })
    }

    /// Sign out and return to the login page of the role that was signed in.
    pub fn logout(&self) -> Result<PortalOutcome, AuthError> {
        let _pending = self.begin()?;
        let role = self.session.get().role();
        self.exchange.logout()?;

        let login = role.unwrap_or(Role::Manager).login_path();
        Ok(PortalOutcome::Navigate {
            to: login.to_string(),
            notice: None,
        })
    }
}
