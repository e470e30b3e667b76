//! Serde helpers for reading blobs written by older clients.
//!
//! Older documents stored form values verbatim: item quantities as strings
//! and an unselected department as `""`.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional id, treating `null` and blank strings as absent.
pub fn blank_id_as_none<'de, D>(deserializer: D) -> Result<Option<crate::EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| crate::EntityId::new(value).ok()))
}

/// Deserialize a quantity given either as a number or a numeric string.
///
/// Anything that is not a positive integer becomes 1.
pub fn flexible_qty<'de, D>(deserializer: D) -> Result<crate::Qty, D::Error>
where
    D: Deserializer<'de>,
{
    use crate::Qty;
    use serde::de::{self, Visitor};
    use std::fmt;

    struct QtyVisitor;

    impl<'de> Visitor<'de> for QtyVisitor {
        type Value = Qty;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a quantity as number or string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Qty, E> {
            Ok(u32::try_from(value).ok().and_then(Qty::new).unwrap_or_default())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Qty, E> {
            Ok(u32::try_from(value).ok().and_then(Qty::new).unwrap_or_default())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Qty, E> {
            if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
                Ok(Qty::new(value as u32).unwrap_or_default())
            } else {
                Ok(Qty::ONE)
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Qty, E> {
            Ok(crate::request::parse_qty(value))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Qty, E> {
            Ok(Qty::ONE)
        }
    }

    deserializer.deserialize_any(QtyVisitor)
}
