use serde::{Deserialize, Serialize};

use crate::EntityId;

/// An organizational unit. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
