//! The presentation boundary.
//!
//! The core never produces markup or terminal output itself. After every
//! navigation it hands the active view and its prepared data to a
//! [`ViewRenderer`], and it hands outcome messages to the same renderer
//! through [`ViewRenderer::notify`].
//!
//! # Example
//!
//! ```ignore
//! struct PlainRenderer;
//!
//! impl ViewRenderer for PlainRenderer {
//!     fn render(&mut self, view: View, model: &ViewModel, principal: Option<&Account>) {
//!         println!("{view}");
//!     }
//!
//!     fn notify(&mut self, notification: &Notification) {
//!         eprintln!("{notification}");
//!     }
//! }
//! ```

use orgdesk_model::Account;

use crate::notify::Notification;
use crate::router::View;
use crate::view_model::ViewModel;

/// Receives the active view and the outcome messages of operations.
pub trait ViewRenderer {
    /// Present `view` using the data in `model`.
    ///
    /// # Arguments
    ///
    /// * `view` - The active view (never [`View::NotFound`])
    /// * `model` - Data prepared for that view
    /// * `principal` - The signed-in account, if any
    fn render(&mut self, view: View, model: &ViewModel, principal: Option<&Account>);

    /// Present a single outcome message.
    fn notify(&mut self, notification: &Notification);
}

/// Renderer that records what it was asked to show. Useful in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub rendered: Vec<(View, ViewModel)>,
    pub notifications: Vec<Notification>,
}

impl ViewRenderer for RecordingRenderer {
    fn render(&mut self, view: View, model: &ViewModel, _principal: Option<&Account>) {
        self.rendered.push((view, model.clone()));
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}
