use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a stored order.
///
/// The serialized form uses the warehouse's legacy labels (`"Nhập"` for a
/// received order, `"Xuất"` for a shipped one). Both the persisted
/// collection and the HTTP bodies sent to the remote endpoints carry these
/// exact strings, so the representation must never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order is in the warehouse.
    #[serde(rename = "Nhập")]
    Received,
    /// The order has been shipped out.
    #[serde(rename = "Xuất")]
    Shipped,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Received => write!(f, "Nhập"),
            OrderStatus::Shipped => write!(f, "Xuất"),
        }
    }
}

/// One warehouse item with its location metadata.
///
/// Orders have no stable identifier; the collection is index-addressed and
/// duplicates with identical fields are allowed. `shelf` and `position` are
/// numeric-entry hints on the capture side but stored as plain strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub name: String,
    pub sender: String,
    /// Human-readable local timestamp, stamped at creation and never updated.
    pub time: String,
    pub zone: String,
    pub shelf: String,
    pub position: String,
    pub status: OrderStatus,
}

impl Order {
    /// Builds a freshly received order from a validated draft, stamping the
    /// current local time.
    pub fn from_draft(draft: OrderDraft) -> Self {
        Self {
            name: draft.name,
            sender: draft.sender,
            time: Local::now().format("%d/%m/%Y %H:%M:%S").to_string(),
            zone: draft.zone,
            shelf: draft.shelf,
            position: draft.position,
            status: OrderStatus::Received,
        }
    }
}

/// Capture payload for a new order: everything but the stamped fields.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub name: String,
    pub sender: String,
    pub zone: String,
    pub shelf: String,
    pub position: String,
}

impl OrderDraft {
    /// Checks that every field carries a non-blank value.
    ///
    /// Returns the name of the first missing field, in capture order, so the
    /// caller can point the user at it.
    pub fn validate(&self) -> Result<(), &'static str> {
        for (field, value) in [
            ("name", &self.name),
            ("sender", &self.sender),
            ("zone", &self.zone),
            ("shelf", &self.shelf),
            ("position", &self.position),
        ] {
            if value.trim().is_empty() {
                return Err(field);
            }
        }
        Ok(())
    }
}
