//! User accounts and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EntityId;

/// Authorization role of an account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the admin-only views.
    Admin,
    /// Regular account (profile and own requests only).
    #[default]
    User,
}

impl Role {
    /// Returns the name as it is persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login account.
///
/// `email` doubles as the session token and is compared case-sensitively.
/// Passwords are stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// True when `email`/`password` match exactly and the account is verified.
    pub fn accepts_login(&self, email: &str, password: &str) -> bool {
        self.verified && self.email == email && self.password == password
    }
}
