//! Access guards evaluated before every activation.

use std::fmt;

use orgdesk_model::Account;

use crate::notify::Notification;
use crate::router::{Access, View};

/// Message shown when a signed-in user without the admin role asks for an
/// admin view.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Admins only.";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        to: View,
        notice: Option<Notification>,
    },
}

impl GuardDecision {
    pub fn redirect(to: View) -> Self {
        Self::Redirect { to, notice: None }
    }

    pub fn redirect_with(to: View, notice: Notification) -> Self {
        Self::Redirect {
            to,
            notice: Some(notice),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A predicate over (target view, principal).
pub trait Guard: fmt::Debug {
    fn name(&self) -> &'static str;

    fn check(&self, view: View, principal: Option<&Account>) -> GuardDecision;
}

/// Views reserved for signed-in accounts send anonymous visitors to login.
#[derive(Debug, Default)]
pub struct AuthenticatedGuard;

impl Guard for AuthenticatedGuard {
    fn name(&self) -> &'static str {
        "authenticated"
    }

    fn check(&self, view: View, principal: Option<&Account>) -> GuardDecision {
        if view.access() == Access::Authenticated && principal.is_none() {
            return GuardDecision::redirect(View::Login);
        }
        GuardDecision::Allow
    }
}

/// Admin views send anonymous visitors to login and other accounts home.
#[derive(Debug, Default)]
pub struct AdminGuard;

impl Guard for AdminGuard {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn check(&self, view: View, principal: Option<&Account>) -> GuardDecision {
        if view.access() != Access::Admin {
            return GuardDecision::Allow;
        }
        match principal {
            None => GuardDecision::redirect(View::Login),
            Some(account) if !account.is_admin() => GuardDecision::redirect_with(
                View::Home,
                Notification::error(ACCESS_DENIED_MESSAGE),
            ),
            Some(_) => GuardDecision::Allow,
        }
    }
}

/// Ordered guard chain. The first guard that does not allow decides.
#[derive(Debug)]
pub struct AccessGuard {
    guards: Vec<Box<dyn Guard>>,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new(vec![Box::new(AuthenticatedGuard), Box::new(AdminGuard)])
    }
}

impl AccessGuard {
    pub fn new(guards: Vec<Box<dyn Guard>>) -> Self {
        Self { guards }
    }

    pub fn evaluate(&self, view: View, principal: Option<&Account>) -> GuardDecision {
        for guard in &self.guards {
            let decision = guard.check(view, principal);
            if !decision.is_allow() {
                tracing::info!(
                    guard = guard.name(),
                    view = view.name(),
                    signed_in = principal.is_some(),
                    "navigation denied"
                );
                return decision;
            }
        }
        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdesk_model::{EntityId, Role};

    fn user(role: Role) -> Account {
        Account {
            id: EntityId::new("acc_2").unwrap(),
            first_name: "Bob".to_string(),
            last_name: "Stone".to_string(),
            email: "bob@x.com".to_string(),
            password: "secret1".to_string(),
            role,
            verified: true,
        }
    }

    #[test]
    fn test_public_views_always_allowed() {
        let guard = AccessGuard::default();
        for view in [View::Home, View::Register, View::VerifyEmail, View::Login] {
            assert!(guard.evaluate(view, None).is_allow());
        }
    }

    #[test]
    fn test_admin_guard_decisions() {
        let guard = AdminGuard;
        assert_eq!(
            guard.check(View::Employees, None),
            GuardDecision::redirect(View::Login)
        );
        assert_eq!(
            guard.check(View::Employees, Some(&user(Role::User))),
            GuardDecision::redirect_with(View::Home, Notification::error(ACCESS_DENIED_MESSAGE))
        );
        assert!(guard.check(View::Employees, Some(&user(Role::Admin))).is_allow());
    }

    #[test]
    fn test_authenticated_guard_ignores_admin_views() {
        let guard = AuthenticatedGuard;
        assert!(guard.check(View::Accounts, None).is_allow());
        assert_eq!(
            guard.check(View::Profile, None),
            GuardDecision::redirect(View::Login)
        );
        assert!(guard.check(View::Profile, Some(&user(Role::User))).is_allow());
    }
}
