//! Fragment-based routing.
//!
//! A location fragment such as `#/departments` is resolved to exactly one
//! [`View`]. Before a view becomes active the [`AccessGuard`] chain is
//! consulted; a redirect re-enters the chain with the new target, so a
//! guarded redirect target is checked like any other request.

use serde::Serialize;
use std::fmt;

use orgdesk_model::Account;

use crate::error::{CoreError, Result};
use crate::guard::{AccessGuard, GuardDecision};
use crate::notify::Notification;

/// Upper bound on consecutive redirects within one navigation.
pub const MAX_REDIRECTS: usize = 8;

// =============================================================================
// VIEW ENUM
// =============================================================================

/// A screen the router can activate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Register,
    VerifyEmail,
    Login,
    Profile,
    Employees,
    Departments,
    Accounts,
    Requests,
    /// Unrecognized fragment. Never active itself; resolves to `Home`.
    NotFound,
}

/// Who may enter a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl View {
    /// Route name as it appears after `#/`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "",
            Self::Register => "register",
            Self::VerifyEmail => "verify-email",
            Self::Login => "login",
            Self::Profile => "profile",
            Self::Employees => "employees",
            Self::Departments => "departments",
            Self::Accounts => "accounts",
            Self::Requests => "requests",
            Self::NotFound => "not-found",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Register => "Register",
            Self::VerifyEmail => "Verify Email",
            Self::Login => "Login",
            Self::Profile => "Profile",
            Self::Employees => "Employees",
            Self::Departments => "Departments",
            Self::Accounts => "Accounts",
            Self::Requests => "My Requests",
            Self::NotFound => "Not Found",
        }
    }

    /// Canonical fragment for this view, e.g. `#/login`.
    pub fn fragment(&self) -> String {
        format!("#/{}", self.name())
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Profile | Self::Requests => Access::Authenticated,
            Self::Employees | Self::Departments | Self::Accounts => Access::Admin,
            _ => Access::Public,
        }
    }

    /// Resolve a location fragment. `""`, `"#"` and `"#/"` are home;
    /// anything unrecognized is [`View::NotFound`].
    pub fn parse(fragment: &str) -> Self {
        match route_name(fragment) {
            "" => Self::Home,
            "register" => Self::Register,
            "verify-email" => Self::VerifyEmail,
            "login" => Self::Login,
            "profile" => Self::Profile,
            "employees" => Self::Employees,
            "departments" => Self::Departments,
            "accounts" => Self::Accounts,
            "requests" => Self::Requests,
            _ => Self::NotFound,
        }
    }

    /// All views that can be active, in menu order.
    pub const fn all() -> &'static [View] {
        &[
            Self::Home,
            Self::Register,
            Self::VerifyEmail,
            Self::Login,
            Self::Profile,
            Self::Employees,
            Self::Departments,
            Self::Accounts,
            Self::Requests,
        ]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Strip `#`, `/` and surrounding whitespace from a fragment.
fn route_name(fragment: &str) -> &str {
    let trimmed = fragment.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    trimmed.strip_suffix('/').unwrap_or(trimmed).trim()
}

/// Normalized fragment for display and persistence.
fn normalize_fragment(fragment: &str) -> String {
    format!("#/{}", route_name(fragment))
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// The settled result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// View the request resolved to before any guard ran.
    pub requested: View,
    /// View that ended up active.
    pub active: View,
    /// Location fragment after the navigation.
    pub location: String,
    /// Redirect targets in the order the guards issued them.
    pub redirects: Vec<View>,
    /// Notifications raised by guards along the way.
    pub notices: Vec<Notification>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Holds the single active view and the current location.
#[derive(Debug)]
pub struct Router {
    active: View,
    location: String,
    guard: AccessGuard,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(AccessGuard::default())
    }
}

impl Router {
    pub fn new(guard: AccessGuard) -> Self {
        Self {
            active: View::Home,
            location: View::Home.fragment(),
            guard,
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Work out where a request for `fragment` ends up without changing
    /// the router.
    pub fn resolve(&self, fragment: &str, principal: Option<&Account>) -> Result<Navigation> {
        let requested = View::parse(fragment);
        let mut target = requested;
        let mut location = normalize_fragment(fragment);
        let mut redirects = Vec::new();
        let mut notices = Vec::new();

        loop {
            match self.guard.evaluate(target, principal) {
                GuardDecision::Allow => break,
                GuardDecision::Redirect { to, notice } => {
                    tracing::debug!(from = ?target, to = ?to, "guard redirect");
                    notices.extend(notice);
                    redirects.push(to);
                    if redirects.len() > MAX_REDIRECTS {
                        return Err(CoreError::RedirectLoop {
                            requested: location,
                            hops: redirects.len(),
                        });
                    }
                    target = to;
                    location = to.fragment();
                }
            }
        }

        let active = match target {
            View::NotFound => View::Home,
            view => view,
        };

        Ok(Navigation {
            requested,
            active,
            location,
            redirects,
            notices,
        })
    }

    /// Make a resolved navigation current. Replaces the active view in one
    /// assignment, so there is never zero or more than one active view.
    pub fn commit(&mut self, navigation: &Navigation) {
        self.active = navigation.active;
        self.location.clone_from(&navigation.location);
    }

    /// Resolve and commit in one step.
    pub fn navigate(&mut self, fragment: &str, principal: Option<&Account>) -> Result<Navigation> {
        let navigation = self.resolve(fragment, principal)?;
        self.commit(&navigation);
        Ok(navigation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::Guard;
    use orgdesk_model::{EntityId, Role};

    fn account(role: Role) -> Account {
        Account {
            id: EntityId::new("acc_9").unwrap(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            password: "secret1".to_string(),
            role,
            verified: true,
        }
    }

    #[test]
    fn test_parse_fragments() {
        assert_eq!(View::parse(""), View::Home);
        assert_eq!(View::parse("#"), View::Home);
        assert_eq!(View::parse("#/"), View::Home);
        assert_eq!(View::parse("#/login"), View::Login);
        assert_eq!(View::parse("verify-email"), View::VerifyEmail);
        assert_eq!(View::parse(" #/accounts/ "), View::Accounts);
        assert_eq!(View::parse("#/nowhere"), View::NotFound);
        assert_eq!(View::parse("#/Login"), View::NotFound);
    }

    #[test]
    fn test_fragment_round_trips_for_all_views() {
        for view in View::all() {
            assert_eq!(View::parse(&view.fragment()), *view);
        }
    }

    #[test]
    fn test_unknown_route_activates_home_but_keeps_location() {
        let mut router = Router::default();
        let nav = router.navigate("#/nowhere", None).unwrap();
        assert_eq!(nav.requested, View::NotFound);
        assert_eq!(router.active(), View::Home);
        assert_eq!(router.location(), "#/nowhere");
    }

    #[test]
    fn test_authenticated_view_redirects_anonymous_to_login() {
        let mut router = Router::default();
        let nav = router.navigate("#/requests", None).unwrap();
        assert_eq!(nav.active, View::Login);
        assert_eq!(nav.redirects, vec![View::Login]);
        assert!(nav.notices.is_empty());
        assert_eq!(router.location(), "#/login");
    }

    #[test]
    fn test_admin_view_denies_user_with_notice() {
        let user = account(Role::User);
        let mut router = Router::default();
        let nav = router.navigate("#/accounts", Some(&user)).unwrap();
        assert_eq!(nav.active, View::Home);
        assert_eq!(nav.notices.len(), 1);
        assert_eq!(router.active(), View::Home);
    }

    #[test]
    fn test_admin_enters_admin_view() {
        let admin = account(Role::Admin);
        let mut router = Router::default();
        let nav = router.navigate("#/departments", Some(&admin)).unwrap();
        assert_eq!(nav.active, View::Departments);
        assert!(!nav.was_redirected());
    }

    #[test]
    fn test_resolve_does_not_change_router() {
        let router = Router::default();
        let nav = router.resolve("#/register", None).unwrap();
        assert_eq!(nav.active, View::Register);
        assert_eq!(router.active(), View::Home);
    }

    /// Bounces every request to login, including login itself.
    #[derive(Debug)]
    struct AlwaysToLogin;

    impl Guard for AlwaysToLogin {
        fn name(&self) -> &'static str {
            "always-to-login"
        }

        fn check(&self, _view: View, _principal: Option<&Account>) -> GuardDecision {
            GuardDecision::redirect(View::Login)
        }
    }

    #[test]
    fn test_redirect_targets_are_guarded_and_loops_are_cut() {
        let mut router = Router::new(AccessGuard::new(vec![Box::new(AlwaysToLogin)]));
        let result = router.navigate("#/profile", None);
        assert!(matches!(
            result,
            Err(CoreError::RedirectLoop { hops, .. }) if hops == MAX_REDIRECTS + 1
        ));
        assert_eq!(router.active(), View::Home);
    }
}
