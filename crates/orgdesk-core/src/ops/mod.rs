//! Operations invoked by the view layer.
//!
//! Each submodule adds an `impl<S: Storage> App<S>` block for one area.
//! Every operation validates its input before touching the document and
//! mutates only through [`DocumentStore::transact`](orgdesk_store::DocumentStore::transact),
//! so a failure of any kind leaves the document and session as they were.

mod accounts;
mod auth;
mod departments;
mod employees;
mod requests;

pub use auth::VERIFIED_MESSAGE;

use crate::error::{CoreError, Result, ValidationError};

/// Log a rejected form and turn it into an error.
fn reject<T>(operation: &'static str, error: ValidationError) -> Result<T> {
    tracing::debug!(operation, field = error.field, reason = %error, "rejected input");
    Err(CoreError::Validation(error))
}
