use shared::model::Role;

pub const ADMIN_AREA: &str = "/admin";
pub const OWNER_AREA: &str = "/owner";

/// What the guard should do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(String),
    /// Render an inline access-denied state; no navigation.
    Deny,
}

impl Decision {
    fn redirect(path: &str) -> Self {
        Decision::RedirectTo(path.to_string())
    }
}

/// Map a navigation to allow, redirect or deny.
///
/// Pure: the same inputs always give the same decision. An authenticated
/// caller without a known role is sent to the generic login page.
pub fn resolve(
    path: &str,
    is_authenticated: bool,
    role: Option<Role>,
    required_roles: Option<&[Role]>,
) -> Decision {
    if !is_authenticated {
        return if path.starts_with(ADMIN_AREA) {
            Decision::redirect(Role::SystemAdmin.login_path())
        } else if path.starts_with(OWNER_AREA) {
            Decision::redirect(Role::Owner.login_path())
        } else {
            Decision::redirect(Role::Manager.login_path())
        };
    }

    let Some(role) = role else {
        return Decision::redirect(Role::Manager.login_path());
    };

    let Some(required) = required_roles else {
        return Decision::Allow;
    };

    if required.contains(&role) {
        return Decision::Allow;
    }

    let in_admin_area = path.starts_with(ADMIN_AREA);
    let in_owner_area = path.starts_with(OWNER_AREA);

    match role {
        Role::SystemAdmin if !in_admin_area => Decision::redirect(role.landing_path()),
        Role::Owner if !in_owner_area => Decision::redirect(role.landing_path()),
        Role::Manager if in_admin_area || in_owner_area => Decision::redirect(role.landing_path()),
        Role::SystemAdmin | Role::Owner | Role::Manager => Decision::Deny,
    }
}

/// The roles an area of the app is meant for.
pub fn area_roles(path: &str) -> &'static [Role] {
    if path.starts_with(ADMIN_AREA) {
        &[Role::SystemAdmin]
    } else if path.starts_with(OWNER_AREA) {
        &[Role::Owner]
    } else {
        &[Role::Manager]
    }
}
