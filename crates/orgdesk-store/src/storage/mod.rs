//! Durable key-value storage.
//!
//! All persisted state lives under a handful of string keys:
//! - [`DOCUMENT_KEY`]: the serialized document
//! - [`SESSION_TOKEN_KEY`]: the logged-in account's email
//! - [`PENDING_VERIFICATION_KEY`]: email awaiting verification
//! - [`LOCATION_KEY`]: last location fragment

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Key holding the document blob.
pub const DOCUMENT_KEY: &str = "ipt_demo_v1";

/// Key holding the session token.
pub const SESSION_TOKEN_KEY: &str = "auth_token";

/// Key holding the pending-verification marker.
pub const PENDING_VERIFICATION_KEY: &str = "unverified_email";

/// Key holding the last location fragment.
pub const LOCATION_KEY: &str = "location";

/// A durable string key-value store.
///
/// Writes replace the previous value wholesale; a failed write leaves the
/// previous value in place.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
