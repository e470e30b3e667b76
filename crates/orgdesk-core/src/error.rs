//! Operation error types.
//!
//! Every failed operation leaves the document and the session exactly as
//! they were before the call.

use orgdesk_model::{Collection, EntityId};
use orgdesk_store::PersistenceError;
use thiserror::Error;

use crate::notify::{Notification, Severity};
use crate::router::View;

/// A missing or malformed form value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Form field the message refers to, when it concerns a single field.
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    // =========================================================================
    // INPUT
    // =========================================================================
    /// Form input rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // TARGETS
    // =========================================================================
    /// The targeted record no longer exists.
    #[error("No {} record with id {id}", .collection.name())]
    NotFound { collection: Collection, id: EntityId },

    /// No email address is waiting for verification.
    #[error("No email to verify.")]
    NothingToVerify,

    /// The pending email does not belong to any account.
    #[error("Account not found.")]
    UnknownPendingAccount { email: String },

    // =========================================================================
    // ACCESS
    // =========================================================================
    /// The view owning the operation could not be entered.
    #[error("Access to {} was refused", .view.name())]
    Authorization { view: View },

    /// Guards kept redirecting without settling on a view.
    #[error("Navigation to {requested} did not settle after {hops} redirects")]
    RedirectLoop { requested: String, hops: usize },

    // =========================================================================
    // STORAGE
    // =========================================================================
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CoreError {
    pub fn not_found(collection: Collection, id: &EntityId) -> Self {
        Self::NotFound {
            collection,
            id: id.clone(),
        }
    }

    /// Severity used when the error is shown as a notification.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Authorization { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence(error) => error.user_message(),
            other => other.to_string(),
        }
    }

    /// The error as a notification for the view layer.
    pub fn to_notification(&self) -> Notification {
        Notification::new(self.severity(), self.user_message())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
