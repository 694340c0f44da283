//! # Remote Sinks
//!
//! The two HTTP endpoints that receive a copy of an order on lifecycle
//! transitions: the warehouse server (add and ship) and the spreadsheet
//! webhook (ship only). Both take the order as a JSON body and treat any
//! 2xx response as acceptance.
//!
//! The [`OrderSink`] trait is the seam the lifecycle layer depends on, so
//! tests swap in [`mock::MockSink`] instead of a live endpoint.

pub mod mock;
pub mod spreadsheet;
pub mod warehouse;

pub use spreadsheet::SpreadsheetSink;
pub use warehouse::WarehouseServerSink;

use async_trait::async_trait;

use crate::model::Order;

/// Errors from a single delivery attempt.
///
/// There is no retry inside a sink; retrying is the caller's decision, and
/// the shipment record keeps a whole-operation retry from re-posting to an
/// endpoint that already accepted.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The endpoint answered with a non-2xx status. `message` carries the
    /// server-reported detail when the response body had one.
    #[error("Endpoint returned HTTP {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never completed (unreachable host, DNS failure, reset).
    #[error("Connection failed: {0}")]
    Connectivity(#[from] reqwest::Error),
}

/// A remote destination that accepts order records.
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// Short name used in logs and error context.
    fn name(&self) -> &str;

    /// Delivers one order. `Ok(())` means the endpoint accepted it.
    async fn submit(&self, order: &Order) -> Result<(), SinkError>;
}
