//! Document blob encoding.
//!
//! Blobs are written as a versioned envelope:
//!
//! ```text
//! {"version": 1, "document": {"accounts": [...], "departments": [...], ...}}
//! ```
//!
//! Blobs written before versioning was introduced are a bare document
//! object and are still accepted on read.

use orgdesk_model::Document;
use serde::Serialize;
use serde_json::Value;

use crate::error::{PersistenceError, Result};

/// Current document schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    document: &'a Document,
}

/// Serialize a document into a versioned blob.
pub fn encode_document(document: &Document) -> Result<String> {
    serde_json::to_string(&Envelope {
        version: CURRENT_SCHEMA_VERSION,
        document,
    })
    .map_err(|e| PersistenceError::Serialization { source: e })
}

/// Parse a blob, accepting both the versioned envelope and a bare document.
pub fn decode_document(blob: &str) -> Result<Document> {
    let mut value: Value =
        serde_json::from_str(blob).map_err(|e| PersistenceError::Deserialization { source: e })?;

    let payload = match value.as_object_mut() {
        Some(object) if object.contains_key("version") => {
            let found = object
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(u32::MAX);
            if found > CURRENT_SCHEMA_VERSION {
                return Err(PersistenceError::UnsupportedVersion {
                    found,
                    max_supported: CURRENT_SCHEMA_VERSION,
                });
            }
            object.remove("document").unwrap_or(Value::Null)
        }
        _ => value,
    };

    serde_json::from_value(payload).map_err(|e| PersistenceError::Deserialization { source: e })
}
