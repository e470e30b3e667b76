use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Employment record linking an account to a department.
///
/// `user_id` and `dept_id` are weak references captured at write time.
/// Deleting the referenced account or department leaves them dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    /// External employee code, free text.
    pub employee_id: String,
    pub user_email: String,
    pub user_id: EntityId,
    pub position: String,
    #[serde(default, deserialize_with = "crate::serde_helpers::blank_id_as_none")]
    pub dept_id: Option<EntityId>,
    #[serde(default)]
    pub hire_date: String,
}
