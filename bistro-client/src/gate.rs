//! Authorization gate
//!
//! Advisory route gating for the dashboards. This decides what the UI
//! renders and nothing more: the backend authorizes every API call on its
//! own, so a wrong answer here can never leak data.
//!
//! | Route | Path | Required role |
//! |-------|------|---------------|
//! | `Login` | `/login` | none (public) |
//! | `Dashboard(role)` | `/<role>` | exactly `role` |

use shared::Role;

use crate::session::Session;

/// Gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Decide whether `session` may see a target requiring one of `required`
///
/// `None` means any signed-in principal.
pub fn authorize(session: &Session, required: Option<&[Role]>) -> Access {
    let Some(principal) = session.principal() else {
        return Access::Deny;
    };
    match required {
        Some(roles) if !roles.contains(&principal.role) => Access::Deny,
        _ => Access::Allow,
    }
}

/// Navigation target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard(Role),
}

impl Route {
    pub const LOGIN_PATH: &'static str = "/login";

    /// Dashboard a role lands on after signing in
    pub fn landing(role: Role) -> Self {
        Self::Dashboard(role)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => Self::LOGIN_PATH.to_string(),
            Self::Dashboard(role) => format!("/{}", role.as_str()),
        }
    }

    /// Parse a path, `None` for paths no route owns
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed == Self::LOGIN_PATH {
            return Some(Self::Login);
        }
        let name = trimmed.strip_prefix('/')?;
        // legacy spelling is accepted by `Role`, but is not a route
        if name == "butcher" {
            return None;
        }
        name.parse::<Role>().ok().map(Self::Dashboard)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Roles allowed to render this route, `None` for public routes
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Login => None,
            Self::Dashboard(role) => Some(role_slice(*role)),
        }
    }
}

fn role_slice(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &[Role::Admin],
        Role::Manager => &[Role::Manager],
        Role::Waiter => &[Role::Waiter],
        Role::Cashier => &[Role::Cashier],
        Role::Kitchen => &[Role::Kitchen],
        Role::Bar => &[Role::Bar],
        Role::Butchery => &[Role::Butchery],
    }
}

/// Route to render for a navigation to `target`
///
/// Denied navigations silently land on the login route.
pub fn navigate(session: &Session, target: Route) -> Route {
    if target.is_public() {
        return target;
    }
    match authorize(session, target.required_roles()) {
        Access::Allow => target,
        Access::Deny => {
            tracing::debug!(path = %target.path(), "Navigation denied, redirecting to login");
            Route::Login
        }
    }
}
