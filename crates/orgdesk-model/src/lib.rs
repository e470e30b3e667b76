//! Data model for orgdesk: accounts, departments, employees and item
//! requests, held together in a single [`Document`].

pub mod account;
pub mod department;
pub mod document;
pub mod employee;
pub mod error;
pub mod ids;
pub mod request;
pub mod serde_helpers;

pub use account::{Account, Role};
pub use department::Department;
pub use document::{Collection, Document, Entity, MISSING_REFERENCE_LABEL};
pub use employee::Employee;
pub use error::{ModelError, Result};
pub use ids::EntityId;
pub use request::{Qty, Request, RequestItem, RequestStatus, parse_qty};
