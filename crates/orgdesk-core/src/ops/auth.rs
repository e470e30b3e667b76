use orgdesk_model::{Account, Collection, Role};
use orgdesk_store::{PENDING_VERIFICATION_KEY, Storage};

use super::reject;
use crate::app::App;
use crate::error::{CoreError, Result, ValidationError};
use crate::forms::RegisterForm;
use crate::notify::Notification;
use crate::router::View;

/// Shown as a notice and on the login view after verification.
pub const VERIFIED_MESSAGE: &str = "Email verified! You may now log in.";

impl<S: Storage> App<S> {
    /// Create an unverified user account and move on to verification.
    pub fn register(&mut self, form: &RegisterForm) -> Result<Account> {
        if let Err(error) = form.validate() {
            return reject("register", error);
        }
        let email = form.email.trim();
        if self.document().account_by_email(email).is_some() {
            return reject(
                "register",
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
                    password: form.password.clone(),
                    role: Role::User,
                    verified: false,
                })
                .clone(),
            )
        })?;
        self.store
            .storage_mut()
            .set(PENDING_VERIFICATION_KEY, &account.email)?;
        tracing::info!(account = %account.id, "registered account");

        self.navigate_to(View::VerifyEmail)?;
        Ok(account)
    }

    /// Mark the pending account verified. Does not sign it in.
    pub fn verify_email(&mut self) -> Result<Account> {
        let Some(email) = self.store.storage().get(PENDING_VERIFICATION_KEY)? else {
            return Err(CoreError::NothingToVerify);
        };
        let Some(id) = self.document().account_by_email(&email).map(|a| a.id.clone()) else {
            return Err(CoreError::UnknownPendingAccount { email });
        };

        let account = self.store.transact(|doc| {
            doc.update(&id, |account: &mut Account| account.verified = true);
            doc.get::<Account>(&id)
                .cloned()
                .ok_or_else(|| CoreError::not_found(Collection::Accounts, &id))
        })?;
        self.store.storage_mut().remove(PENDING_VERIFICATION_KEY)?;
        tracing::info!(account = %account.id, "verified account");

        self.notify(Notification::success(VERIFIED_MESSAGE));
        self.login_flash = Some(VERIFIED_MESSAGE.to_string());
        self.navigate_to(View::Login)?;
        Ok(account)
    }

    /// Sign in a verified account and open its profile.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Account> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return reject(
                "login",
                ValidationError::new("Please enter email and password."),
            );
        }

        let (document, storage) = self.store.parts_mut();
        let Some(account) = document
            .find(|account: &Account| account.accepts_login(email, password))
            .cloned()
        else {
            return reject(
                "login",
                ValidationError::new("Invalid email, password, or account not verified."),
            );
        };
        self.session.establish(storage, &account)?;

        self.notify(Notification::success(format!(
            "Welcome back, {}!",
            account.first_name
        )));
        self.navigate_to(View::Profile)?;
        Ok(account)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.clear(self.store.storage_mut())?;
        self.notify(Notification::info("You have been logged out."));
        self.navigate_to(View::Home)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdesk_store::{MemoryStorage, SESSION_TOKEN_KEY};

    fn bob() -> RegisterForm {
        RegisterForm {
            first_name: " Bob ".into(),
            last_name: "Stone".into(),
            email: "bob@x.com ".into(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn test_register_trims_and_marks_pending() {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        let account = app.register(&bob()).unwrap();
        assert_eq!(account.first_name, "Bob");
        assert_eq!(account.email, "bob@x.com");
        assert!(!account.verified);
        assert_eq!(app.active_view(), View::VerifyEmail);
        assert_eq!(
            app.storage().get(PENDING_VERIFICATION_KEY).unwrap().as_deref(),
            Some("bob@x.com")
        );
    }

    #[test]
    fn test_verify_without_marker_fails() {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        assert!(matches!(app.verify_email(), Err(CoreError::NothingToVerify)));
    }

    #[test]
    fn test_verify_with_stale_marker_fails() {
        let storage = MemoryStorage::new().with_entry(PENDING_VERIFICATION_KEY, "gone@x.com");
        let mut app = App::start(storage).unwrap();
        assert!(matches!(
            app.verify_email(),
            Err(CoreError::UnknownPendingAccount { .. })
        ));
    }

    #[test]
    fn test_verify_sets_login_flash_once() {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        app.register(&bob()).unwrap();
        app.verify_email().unwrap();

        assert_eq!(app.active_view(), View::Login);
        assert!(app.current_account().is_none());
        assert!(matches!(
            app.view_model(),
            crate::ViewModel::Login { flash: Some(message) } if message == VERIFIED_MESSAGE
        ));

        app.navigate("#/register").unwrap();
        app.navigate("#/login").unwrap();
        assert!(matches!(app.view_model(), crate::ViewModel::Login { flash: None }));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        let err = app.login("  ", "x").unwrap_err();
        assert_eq!(err.to_string(), "Please enter email and password.");
    }

    #[test]
    fn test_logout_clears_token() {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        app.login("admin@example.com", "Password123!").unwrap();
        assert!(app.storage().get(SESSION_TOKEN_KEY).unwrap().is_some());

        app.logout().unwrap();
        assert!(app.current_account().is_none());
        assert_eq!(app.active_view(), View::Home);
        assert_eq!(app.storage().get(SESSION_TOKEN_KEY).unwrap(), None);
        assert_eq!(
            app.take_notifications().last(),
            Some(&Notification::info("You have been logged out."))
        );
    }
}
