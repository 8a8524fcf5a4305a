use tracing::warn;

use crate::auth::Session;
use crate::models::Role;

/// Screens of the dashboard. Each one lists the roles allowed to open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Balance,
    Employees,
    Services,
    Profile,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Balance => "/balance",
            Self::Employees => "/empleadas",
            Self::Services => "/servicio",
            Self::Profile => "/perfil",
        }
    }

    /// The `salon` subcommand that renders this view.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Login => "--user <email>",
            Self::Dashboard => "dashboard",
            Self::Balance => "balance",
            Self::Employees => "employees list",
            Self::Services => "services list",
            Self::Profile => "profile",
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::Dashboard | Self::Balance | Self::Employees => &[Role::Admin],
            Self::Services | Self::Profile => &[Role::Admin, Role::Staff],
            Self::Login => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Redirect(View),
}

pub fn is_permitted(role: Role, allowed_roles: &[Role]) -> bool {
    allowed_roles.contains(&role)
}

/// Landing view for a role.
pub fn home(role: Role) -> View {
    match role {
        Role::Admin => View::Dashboard,
        Role::Staff => View::Services,
    }
}

/// Decide whether `session` may open `view`. Denial is a redirect, never an error.
pub fn check(session: Option<&Session>, view: View) -> Decision {
    let Some(session) = session else {
        return Decision::Redirect(View::Login);
    };
    if is_permitted(session.role, view.allowed_roles()) {
        Decision::Permit
    } else {
        let target = home(session.role);
        warn!(
            user = %session.email,
            role = %session.role,
            denied = view.path(),
            redirect = target.path(),
            "access denied"
        );
        Decision::Redirect(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            user_id: "2".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Martínez".to_string(),
            email: "ana@different.com".to_string(),
            role,
            employee_id: None,
        }
    }

    #[test]
    fn test_is_permitted() {
        assert!(!is_permitted(Role::Staff, &[Role::Admin]));
        assert!(is_permitted(Role::Admin, &[Role::Admin]));
        assert!(is_permitted(Role::Staff, &[Role::Admin, Role::Staff]));
        assert!(!is_permitted(Role::Admin, &[]));
    }

    #[test]
    fn test_staff_denied_admin_view_redirects_to_service_log() {
        let decision = check(Some(&session(Role::Staff)), View::Balance);
        assert_eq!(decision, Decision::Redirect(View::Services));
        assert_eq!(View::Services.path(), "/servicio");
    }

    #[test]
    fn test_admin_home_is_dashboard() {
        assert_eq!(home(Role::Admin), View::Dashboard);
        assert_eq!(home(Role::Admin).path(), "/dashboard");
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        assert_eq!(check(None, View::Services), Decision::Redirect(View::Login));
    }

    #[test]
    fn test_shared_views_permit_both_roles() {
        for role in [Role::Admin, Role::Staff] {
            assert_eq!(check(Some(&session(role)), View::Services), Decision::Permit);
            assert_eq!(check(Some(&session(role)), View::Profile), Decision::Permit);
        }
        assert_eq!(check(Some(&session(Role::Admin)), View::Employees), Decision::Permit);
    }
}
