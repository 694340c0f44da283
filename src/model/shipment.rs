use serde::{Deserialize, Serialize};

use crate::model::{Order, OrderStatus};

/// How far an in-flight shipment has progressed through its two remote
/// acknowledgments.
///
/// The terminal "removed" state has no variant: once the local entry is gone
/// the record itself is cleared from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentPhase {
    /// Shipment started, nothing acknowledged yet.
    Pending,
    /// The warehouse server accepted the order; the spreadsheet has not.
    ServerAcked,
    /// Both remote endpoints accepted; only the local removal remains.
    FullyAcked,
}

/// Durable snapshot of one in-flight ship operation.
///
/// Persisted before the first network call and updated after each
/// acknowledgment, so an interrupted shipment can be resumed without
/// re-posting to an endpoint that already accepted the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Position of the entry in the collection when the shipment began.
    pub index: usize,
    /// The exact body sent to the remote endpoints (status already `Xuất`).
    pub order: Order,
    pub phase: ShipmentPhase,
}

impl ShipmentRecord {
    pub fn new(index: usize, order: Order) -> Self {
        Self {
            index,
            order,
            phase: ShipmentPhase::Pending,
        }
    }

    /// Whether this record belongs to the given collection entry.
    ///
    /// The stored order always carries the shipped status, while the live
    /// entry may still read `Nhập`, so the comparison normalizes the status
    /// before matching.
    pub fn matches(&self, index: usize, current: &Order) -> bool {
        if self.index != index {
            return false;
        }
        let mut probe = current.clone();
        probe.status = OrderStatus::Shipped;
        probe == self.order
    }
}
