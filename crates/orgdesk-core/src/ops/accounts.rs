use orgdesk_model::{Account, Collection, EntityId};
use orgdesk_store::Storage;

use super::reject;
use crate::app::App;
use crate::error::{CoreError, Result, ValidationError};
use crate::forms::{AccountForm, MIN_PASSWORD_LEN};
use crate::notify::Notification;
use crate::router::View;

impl<S: Storage> App<S> {
    pub fn create_account(&mut self, form: &AccountForm) -> Result<Account> {
        self.require_view(View::Accounts)?;
        if let Err(error) = form.validate() {
            return reject("create_account", error);
        }
        let Some(password) = form.new_password() else {
            return reject(
                "create_account",
                ValidationError::for_field(
                    "password",
                    format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
                ),
            );
        };
        let email = form.email.trim();
        if self.document().account_by_email(email).is_some() {
            return reject(
                "create_account",
                ValidationError::for_field("email", "An account with that email already exists."),
            );
        }

        let account = self.store.transact(|doc| {
            Ok::<_, CoreError>(
                doc.insert(|id| Account {
                    id,
                    first_name: form.first_name.trim().to_string(),
                    last_name: form.last_name.trim().to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    role: form.role,
                    verified: form.verified,
                })
                .clone(),
            )
        })?;
        tracing::info!(account = %account.id, role = account.role.as_str(), "created account");

        self.notify(Notification::success("Account created!"));
        self.refresh()?;
        Ok(account)
    }

    /// Overwrite an account's fields. The password changes only when the
    /// form carries a non-empty one.
    pub fn update_account(&mut self, id: &EntityId, form: &AccountForm) -> Result<Account> {
        self.require_view(View::Accounts)?;
        if let Err(error) = form.validate() {
            return reject("update_account", error);
        }

        let account = self.store.transact(|doc| {
            let found = doc.update(id, |account: &mut Account| {
                account.first_name = form.first_name.trim().to_string();
                account.last_name = form.last_name.trim().to_string();
                account.email = form.email.trim().to_string();
                account.role = form.role;
                account.verified = form.verified;
                if let Some(password) = form.new_password() {
                    account.password = password.to_string();
                }
            });
            if !found {
                return Err(CoreError::not_found(Collection::Accounts, id));
            }
            doc.get::<Account>(id)
                .cloned()
                .ok_or_else(|| CoreError::not_found(Collection::Accounts, id))
        })?;

        // The token is the email, so keep it in step for the signed-in account.
        let own_account = self.session.principal_id() == Some(id);
        if own_account {
            self.session
                .establish(self.store.storage_mut(), &account)?;
        }
        tracing::info!(account = %account.id, "updated account");

        self.notify(Notification::success("Account updated!"));
        if own_account {
            // The principal's role may have changed; re-run the guards.
            let location = self.location().to_string();
            self.navigate(&location)?;
        } else {
            self.refresh()?;
        }
        Ok(account)
    }

    pub fn reset_password(&mut self, id: &EntityId, password: &str) -> Result<()> {
        self.require_view(View::Accounts)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return reject(
                "reset_password",
                ValidationError::for_field("password", "Password too short!"),
            );
        }

        self.store.transact(|doc| {
            if doc.update(id, |account: &mut Account| account.password = password.to_string()) {
                Ok(())
            } else {
                Err(CoreError::not_found(Collection::Accounts, id))
            }
        })?;
        tracing::info!(account = %id, "reset password");

        self.notify(Notification::success("Password reset successfully!"));
        Ok(())
    }

    /// Remove an account. Employees and requests pointing at it are kept.
    pub fn delete_account(&mut self, id: &EntityId) -> Result<()> {
        self.require_view(View::Accounts)?;
        if self.session.principal_id() == Some(id) {
            return reject(
                "delete_account",
                ValidationError::new("You cannot delete your own account!"),
            );
        }

        self.store.transact(|doc| {
            if doc.remove::<Account>(id) {
                Ok(())
            } else {
                Err(CoreError::not_found(Collection::Accounts, id))
            }
        })?;
        tracing::info!(account = %id, "deleted account");

        self.notify(Notification::info("Account deleted."));
        self.refresh()?;
        Ok(())
    }
}
