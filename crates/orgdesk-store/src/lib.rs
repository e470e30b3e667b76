//! Durable storage for orgdesk.
//!
//! The whole application state is one [`orgdesk_model::Document`], kept in
//! memory by a [`DocumentStore`] and mirrored to a string key-value
//! [`Storage`] after every mutation.
//!
//! # Layout
//!
//! - `storage/` - the key-value boundary ([`MemoryStorage`], [`FileStorage`])
//! - `codec.rs` - versioned blob encoding
//! - `store.rs` - load / seed / save and transactional mutation
//! - `error.rs` - error types with user-friendly messages
//!
//! # Example
//!
//! ```ignore
//! use orgdesk_store::{DocumentStore, FileStorage};
//!
//! let storage = FileStorage::open("store.json")?;
//! let mut store = DocumentStore::load(storage)?;
//! store.insert(|id| Department { id, name: "Sales".into(), description: String::new() })?;
//! ```

mod codec;
mod error;
mod storage;
mod store;

pub use codec::{CURRENT_SCHEMA_VERSION, decode_document, encode_document};
pub use error::{PersistenceError, Result};
pub use storage::{
    DOCUMENT_KEY, FileStorage, LOCATION_KEY, MemoryStorage, PENDING_VERIFICATION_KEY,
    SESSION_TOKEN_KEY, Storage,
};
pub use store::{DocumentStore, LoadOrigin};
