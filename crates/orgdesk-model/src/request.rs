//! Item requests submitted by accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use crate::EntityId;

/// Review status of a request.
///
/// Only `Pending` is ever assigned; the other states exist so stored
/// documents that carry them still load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positive item quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Qty(NonZeroU32);

impl Qty {
    pub const ONE: Qty = Qty(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Qty {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    #[serde(deserialize_with = "crate::serde_helpers::flexible_qty")]
    pub qty: Qty,
}

impl RequestItem {
    /// Build an item from raw form input; the quantity falls back to 1.
    pub fn from_input(name: impl Into<String>, qty: Option<&str>) -> Self {
        Self {
            name: name.into(),
            qty: qty.map_or(Qty::ONE, parse_qty),
        }
    }
}

impl fmt::Display for RequestItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.name, self.qty)
    }
}

/// Parse a quantity as typed into a form. Blank, zero, negative and
/// non-numeric input all yield 1.
pub fn parse_qty(raw: &str) -> Qty {
    raw.trim().parse::<u32>().ok().and_then(Qty::new).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    /// Local calendar date of submission.
    pub date: String,
    pub employee_email: String,
}

impl Request {
    /// Items rendered as `name (xN), ...`.
    pub fn item_summary(&self) -> String {
        self.items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qty_defaults() {
        assert_eq!(parse_qty("3").get(), 3);
        assert_eq!(parse_qty(" 12 ").get(), 12);
        assert_eq!(parse_qty("").get(), 1);
        assert_eq!(parse_qty("0").get(), 1);
        assert_eq!(parse_qty("-2").get(), 1);
        assert_eq!(parse_qty("two").get(), 1);
    }

    #[test]
    fn test_item_accepts_string_and_number_qty() {
        let from_str: RequestItem = serde_json::from_str(r#"{"name":"Mouse","qty":"2"}"#).unwrap();
        let from_num: RequestItem = serde_json::from_str(r#"{"name":"Mouse","qty":2}"#).unwrap();
        let bogus: RequestItem = serde_json::from_str(r#"{"name":"Mouse","qty":"x"}"#).unwrap();
        assert_eq!(from_str.qty.get(), 2);
        assert_eq!(from_num.qty.get(), 2);
        assert_eq!(bogus.qty, Qty::ONE);
    }

    #[test]
    fn test_zero_qty_is_not_representable() {
        assert_eq!(Qty::new(0), None);
        let item: RequestItem = serde_json::from_str(r#"{"name":"Mouse","qty":0}"#).unwrap();
        assert_eq!(item.qty, Qty::ONE);

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"name":"Mouse","qty":1}"#);
        let back: RequestItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_item_summary() {
        let request = Request {
            id: EntityId::new("req_1").unwrap(),
            kind: "Equipment".to_string(),
            items: vec![
                RequestItem::from_input("Laptop", Some("1")),
                RequestItem::from_input("Monitor", Some("2")),
            ],
            status: RequestStatus::Pending,
            date: "2026-10-18".to_string(),
            employee_email: "bob@x.com".to_string(),
        };
        assert_eq!(request.item_summary(), "Laptop (x1), Monitor (x2)");
    }

    #[test]
    fn test_status_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"Approved\""
        );
        let back: RequestStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(back, RequestStatus::Rejected);
    }
}
