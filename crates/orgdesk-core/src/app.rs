//! The application service.
//!
//! [`App`] is constructed once per process and owns every piece of mutable
//! state: the document store, the session, the router and the notification
//! outbox. Operations live in [`crate::ops`] as further `impl` blocks.

use orgdesk_model::{Account, Document};
use orgdesk_store::{DocumentStore, LOCATION_KEY, LoadOrigin, PENDING_VERIFICATION_KEY, Storage};

use crate::error::{CoreError, Result};
use crate::notify::Notification;
use crate::render::ViewRenderer;
use crate::router::{Navigation, Router, View};
use crate::session::SessionState;
use crate::view_model::ViewModel;

#[derive(Debug)]
pub struct App<S: Storage> {
    pub(crate) store: DocumentStore<S>,
    pub(crate) session: SessionState,
    router: Router,
    outbox: Vec<Notification>,
    pub(crate) login_flash: Option<String>,
    model: ViewModel,
}

impl<S: Storage> App<S> {
    /// Load the document, restore the session and activate the stored
    /// location (home when none is stored).
    pub fn start(storage: S) -> Result<Self> {
        Self::start_with_router(storage, Router::default())
    }

    pub fn start_with_router(storage: S, router: Router) -> Result<Self> {
        let mut store = DocumentStore::load(storage)?;
        let (document, storage) = store.parts_mut();
        let session = SessionState::restore(storage, document)?;
        let location = store
            .storage()
            .get(LOCATION_KEY)?
            .unwrap_or_else(|| View::Home.fragment());

        let mut app = Self {
            store,
            session,
            router,
            outbox: Vec::new(),
            login_flash: None,
            model: ViewModel::Home,
        };
        app.navigate(&location)?;
        Ok(app)
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Route to `fragment`, running the guard chain, and prepare the view
    /// that ends up active.
    pub fn navigate(&mut self, fragment: &str) -> Result<Navigation> {
        let principal = self.session.current(self.store.document());
        let navigation = self.router.resolve(fragment, principal)?;

        self.store
            .storage_mut()
            .set(LOCATION_KEY, &navigation.location)?;
        self.router.commit(&navigation);
        self.outbox.extend(navigation.notices.iter().cloned());
        if navigation.active != View::Login {
            self.login_flash = None;
        }
        self.refresh()?;

        tracing::debug!(
            requested = navigation.requested.name(),
            active = navigation.active.name(),
            redirects = navigation.redirects.len(),
            "navigated"
        );
        Ok(navigation)
    }

    pub fn navigate_to(&mut self, view: View) -> Result<Navigation> {
        self.navigate(&view.fragment())
    }

    /// Re-prepare the active view from the current document.
    pub fn refresh(&mut self) -> Result<()> {
        let pending_email = self.store.storage().get(PENDING_VERIFICATION_KEY)?;
        self.model = ViewModel::prepare(
            self.router.active(),
            self.store.document(),
            self.session.current(self.store.document()),
            pending_email,
            self.login_flash.clone(),
        );
        Ok(())
    }

    /// Enter the view that owns an operation. Fails with
    /// [`CoreError::Authorization`] when the guards send us elsewhere; the
    /// redirect and its notice have already happened by then.
    pub(crate) fn require_view(&mut self, view: View) -> Result<()> {
        let navigation = self.navigate_to(view)?;
        if navigation.active == view {
            Ok(())
        } else {
            Err(CoreError::Authorization { view })
        }
    }

    /// Hand pending notifications and the active view to `renderer`.
    pub fn present(&mut self, renderer: &mut impl ViewRenderer) {
        for notification in self.outbox.drain(..) {
            renderer.notify(&notification);
        }
        let principal = self.session.current(self.store.document());
        renderer.render(self.router.active(), &self.model, principal);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn active_view(&self) -> View {
        self.router.active()
    }

    pub fn location(&self) -> &str {
        self.router.location()
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.model
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn load_origin(&self) -> LoadOrigin {
        self.store.origin()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.session.current(self.store.document())
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin(self.store.document())
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.outbox
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.outbox.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use orgdesk_store::{DOCUMENT_KEY, MemoryStorage, SESSION_TOKEN_KEY};

    #[test]
    fn test_start_on_empty_storage_lands_home() {
        let app = App::start(MemoryStorage::new()).unwrap();
        assert_eq!(app.active_view(), View::Home);
        assert_eq!(app.load_origin(), LoadOrigin::SeededEmpty);
        assert!(app.current_account().is_none());
        assert_eq!(
            app.storage().get(LOCATION_KEY).unwrap().as_deref(),
            Some("#/")
        );
    }

    #[test]
    fn test_start_restores_session_and_location() {
        let storage = MemoryStorage::new()
            .with_entry(SESSION_TOKEN_KEY, "admin@example.com")
            .with_entry(LOCATION_KEY, "#/departments");
        let app = App::start(storage).unwrap();
        assert!(app.is_admin());
        assert_eq!(app.active_view(), View::Departments);
        assert!(matches!(app.view_model(), ViewModel::Departments { rows } if rows.len() == 2));
    }

    #[test]
    fn test_start_on_corrupt_document_reseeds_quietly() {
        let storage = MemoryStorage::new()
            .with_entry(DOCUMENT_KEY, "{ this is not json")
            .with_entry(SESSION_TOKEN_KEY, "admin@example.com");
        let app = App::start(storage).unwrap();
        assert_eq!(app.load_origin(), LoadOrigin::SeededCorrupt);
        assert_eq!(app.document(), &Document::seed());
        assert!(app.is_admin());
        assert!(app.notifications().is_empty());
    }

    #[test]
    fn test_stored_guarded_location_without_session_goes_to_login() {
        let storage = MemoryStorage::new().with_entry(LOCATION_KEY, "#/profile");
        let app = App::start(storage).unwrap();
        assert_eq!(app.active_view(), View::Login);
        assert_eq!(app.location(), "#/login");
    }

    #[test]
    fn test_present_drains_outbox() {
        let storage = MemoryStorage::new().with_entry(LOCATION_KEY, "#/");
        let mut app = App::start(storage).unwrap();
        app.notify(Notification::info("hello"));

        let mut renderer = RecordingRenderer::default();
        app.present(&mut renderer);
        assert_eq!(renderer.notifications, vec![Notification::info("hello")]);
        assert_eq!(renderer.rendered, vec![(View::Home, ViewModel::Home)]);
        assert!(app.notifications().is_empty());
    }
}
