use std::fmt;

use uuid::Uuid;

use crate::ModelError;

/// Identifier of a stored entity, e.g. `acc_1` or `dept_5f0c...`.
///
/// Ids are opaque strings once persisted; the prefix only matters when a
/// new id is drawn.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Draw a fresh random id with the given collection prefix.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}_{}", Uuid::new_v4().simple()))
    }

    pub(crate) fn seeded(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
