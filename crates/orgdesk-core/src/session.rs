//! The signed-in principal.
//!
//! Only the account id lives in memory; the account itself is always read
//! back from the current [`Document`], so edits made through the admin
//! panel are visible immediately. The persisted token is the account's
//! email address.

use orgdesk_model::{Account, Document, EntityId};
use orgdesk_store::{SESSION_TOKEN_KEY, Storage};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    principal: Option<EntityId>,
}

impl SessionState {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session from the persisted token. A token that matches
    /// no account is deleted.
    pub fn restore(storage: &mut impl Storage, document: &Document) -> Result<Self> {
        let Some(token) = storage.get(SESSION_TOKEN_KEY)? else {
            return Ok(Self::new());
        };
        match document.account_by_email(&token) {
            Some(account) => {
                tracing::info!(account = %account.id, "session restored");
                Ok(Self {
                    principal: Some(account.id.clone()),
                })
            }
            None => {
                tracing::warn!("session token matches no account, clearing");
                storage.remove(SESSION_TOKEN_KEY)?;
                Ok(Self::new())
            }
        }
    }

    /// Persist a token for `account` and make it the principal.
    pub fn establish(&mut self, storage: &mut impl Storage, account: &Account) -> Result<()> {
        storage.set(SESSION_TOKEN_KEY, &account.email)?;
        self.principal = Some(account.id.clone());
        tracing::info!(account = %account.id, "session established");
        Ok(())
    }

    /// Forget the principal and delete the persisted token.
    pub fn clear(&mut self, storage: &mut impl Storage) -> Result<()> {
        storage.remove(SESSION_TOKEN_KEY)?;
        if let Some(id) = self.principal.take() {
            tracing::info!(account = %id, "session cleared");
        }
        Ok(())
    }

    pub fn principal_id(&self) -> Option<&EntityId> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// The principal's account, if it still exists in `document`.
    pub fn current<'a>(&self, document: &'a Document) -> Option<&'a Account> {
        self.principal
            .as_ref()
            .and_then(|id| document.get::<Account>(id))
    }

    pub fn is_admin(&self, document: &Document) -> bool {
        self.current(document).is_some_and(Account::is_admin)
    }
}
