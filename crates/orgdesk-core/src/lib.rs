//! Application core for orgdesk.
//!
//! Ties the document store to a signed-in session and a guarded router:
//!
//! - [`App`]: the single service object every operation goes through
//! - [`Router`] and [`AccessGuard`]: fragment routing with ordered guards
//! - [`SessionState`]: the principal, rebuilt from a persisted token
//! - [`ViewModel`] and [`ViewRenderer`]: what to show, and who shows it
//!
//! The core does no presentation of its own. A view layer calls the
//! operations on [`App`] with submitted form values and hands a
//! [`ViewRenderer`] to [`App::present`] afterwards.

pub mod app;
pub mod error;
pub mod forms;
pub mod guard;
pub mod notify;
mod ops;
pub mod render;
pub mod router;
pub mod session;
pub mod view_model;

pub use app::App;
pub use error::{CoreError, Result, ValidationError};
pub use forms::{
    AccountForm, DepartmentForm, EmployeeForm, ItemInput, MIN_PASSWORD_LEN, RegisterForm,
    RequestForm,
};
pub use guard::{
    ACCESS_DENIED_MESSAGE, AccessGuard, AdminGuard, AuthenticatedGuard, Guard, GuardDecision,
};
pub use notify::{Notification, Severity};
pub use ops::VERIFIED_MESSAGE;
pub use render::{RecordingRenderer, ViewRenderer};
pub use router::{Access, MAX_REDIRECTS, Navigation, Router, View};
pub use session::SessionState;
pub use view_model::{
    AccountRow, DepartmentRow, EmployeeRow, ProfileCard, RequestRow, ViewModel,
};
