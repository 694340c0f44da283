//! # Order Flow
//!
//! Orchestrates the two lifecycle operations a screen would trigger:
//! adding a received order and shipping a selected one. All inputs arrive
//! as explicit parameters — there is no ambient "selected index" or server
//! address living in here.
//!
//! ## Ship sequencing
//!
//! Shipping is a two-endpoint commit tracked by a persisted
//! [`ShipmentRecord`]:
//!
//! 1. The record is written as `Pending` before the first network call.
//! 2. Warehouse server accepts → `ServerAcked`.
//! 3. Spreadsheet accepts → `FullyAcked`.
//! 4. The local entry is removed (which persists the collection) and the
//!    record is cleared.
//!
//! A failure at any endpoint stops the sequence and leaves the record at
//! its last phase, so retrying the same entry resumes where it stopped
//! instead of re-posting to an endpoint that already accepted. The
//! collection itself is only persisted at step 4: between an optimistic
//! status flip and the removal, memory and disk intentionally disagree,
//! exactly as the list screen has always behaved.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::clients::RepositoryClient;
use crate::model::{Order, OrderDraft, OrderStatus, ShipmentPhase, ShipmentRecord};
use crate::repository::RepositoryError;
use crate::sinks::{OrderSink, SinkError};
use crate::store::LocalStore;

/// Errors from the add operation. Validation failures happen before any
/// side effect; the `Display` text is the operator-facing alert.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What the add operation did.
///
/// The local append is unconditional once validation passes; `upload`
/// reports what the warehouse server made of its copy. A failed upload is
/// not rolled back — the entry stays local and the two sides diverge until
/// the next shipment.
#[derive(Debug)]
pub struct AddReport {
    pub order: Order,
    pub upload: Result<(), SinkError>,
}

/// Errors from the ship operation. The first two happen before any side
/// effect; the sink variants leave the persisted shipment record at the
/// phase it had reached.
#[derive(Debug, Error)]
pub enum ShipError {
    #[error("Please select an order first")]
    NoSelection,

    #[error("No order at index {0}")]
    UnknownOrder(usize),

    #[error("Sending to the warehouse server failed: {0}")]
    Server(#[source] SinkError),

    #[error("Sending to the spreadsheet failed: {0}")]
    Spreadsheet(#[source] SinkError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The lifecycle controller: wires the repository, the store's shipment
/// key, and the two remote sinks into the add and ship operations.
pub struct OrderFlow {
    repository: RepositoryClient,
    server_sink: Arc<dyn OrderSink>,
    sheet_sink: Arc<dyn OrderSink>,
    store: LocalStore,
    optimistic_status: bool,
}

impl OrderFlow {
    pub fn new(
        repository: RepositoryClient,
        server_sink: Arc<dyn OrderSink>,
        sheet_sink: Arc<dyn OrderSink>,
        store: LocalStore,
        optimistic_status: bool,
    ) -> Self {
        Self {
            repository,
            server_sink,
            sheet_sink,
            store,
            optimistic_status,
        }
    }

    /// Read-only snapshot of the collection, for rendering.
    pub async fn orders(&self) -> Result<Vec<Order>, RepositoryError> {
        self.repository.list().await
    }

    /// Validates the draft, appends the new order locally, then offers a
    /// copy to the warehouse server.
    ///
    /// The append persists immediately; the upload outcome rides back in
    /// the report and never undoes it.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_order(&self, draft: OrderDraft) -> Result<AddReport, FlowError> {
        if let Err(field) = draft.validate() {
            warn!(field, "Add rejected: missing field");
            return Err(FlowError::MissingField(field));
        }

        let order = Order::from_draft(draft);
        self.repository.add(order.clone()).await?;

        let upload = self.server_sink.submit(&order).await;
        if let Err(e) = &upload {
            warn!(sink = self.server_sink.name(), error = %e, "Upload failed after local append");
        }
        Ok(AddReport { order, upload })
    }

    /// Ships the selected order: both endpoints must accept before the
    /// entry is removed locally.
    #[instrument(skip(self))]
    pub async fn ship_order(&self, selected: Option<usize>) -> Result<(), ShipError> {
        let index = selected.ok_or(ShipError::NoSelection)?;

        let orders = self.repository.list().await?;
        let Some(current) = orders.get(index) else {
            warn!(index, size = orders.len(), "Ship rejected: no such order");
            return Err(ShipError::UnknownOrder(index));
        };

        let mut record = match self.store.load_shipment().await {
            Some(existing) if existing.matches(index, current) => {
                info!(phase = ?existing.phase, "Resuming interrupted shipment");
                existing
            }
            Some(stale) => {
                debug!(stale_index = stale.index, "Discarding stale shipment record");
                self.begin_shipment(index, current.clone()).await?
            }
            None => self.begin_shipment(index, current.clone()).await?,
        };

        if record.phase == ShipmentPhase::Pending {
            if let Err(e) = self.server_sink.submit(&record.order).await {
                warn!(sink = self.server_sink.name(), error = %e, "Ship stopped at warehouse server");
                return Err(ShipError::Server(e));
            }
            record.phase = ShipmentPhase::ServerAcked;
            self.persist_record(&record).await;
        }

        if record.phase == ShipmentPhase::ServerAcked {
            if let Err(e) = self.sheet_sink.submit(&record.order).await {
                warn!(sink = self.sheet_sink.name(), error = %e, "Ship stopped at spreadsheet");
                return Err(ShipError::Spreadsheet(e));
            }
            record.phase = ShipmentPhase::FullyAcked;
            self.persist_record(&record).await;
        }

        self.finish_shipment(record.index).await
    }

    /// Completes a shipment that was interrupted after both endpoints
    /// acknowledged but before the local removal. Called at startup.
    ///
    /// Records still awaiting an acknowledgment are left in place for the
    /// operator to retry via [`Self::ship_order`].
    pub async fn recover(&self) -> Result<(), ShipError> {
        let Some(record) = self.store.load_shipment().await else {
            return Ok(());
        };
        match record.phase {
            ShipmentPhase::FullyAcked => {
                let orders = self.repository.list().await?;
                match orders.get(record.index) {
                    Some(current) if record.matches(record.index, current) => {
                        info!(index = record.index, "Completing shipment interrupted before removal");
                        self.finish_shipment(record.index).await
                    }
                    _ => {
                        warn!(
                            index = record.index,
                            "Acknowledged shipment no longer matches the collection, clearing record"
                        );
                        self.clear_record().await;
                        Ok(())
                    }
                }
            }
            phase => {
                info!(?phase, index = record.index, "Shipment awaiting retry");
                Ok(())
            }
        }
    }

    /// Starts a fresh shipment: flips the stored entry to shipped (when
    /// optimistic mode is on) and persists a `Pending` record.
    async fn begin_shipment(&self, index: usize, current: Order) -> Result<ShipmentRecord, ShipError> {
        let shipped = if self.optimistic_status {
            self.repository.mark_shipped(index).await?
        } else {
            let mut copy = current;
            copy.status = OrderStatus::Shipped;
            copy
        };
        let record = ShipmentRecord::new(index, shipped);
        self.persist_record(&record).await;
        Ok(record)
    }

    /// Removes the shipped entry (persisting the collection) and clears the
    /// shipment record.
    async fn finish_shipment(&self, index: usize) -> Result<(), ShipError> {
        let removed = self.repository.remove(index).await?;
        info!(name = %removed.name, "Order shipped and removed");
        self.clear_record().await;
        Ok(())
    }

    async fn persist_record(&self, record: &ShipmentRecord) {
        if !self.store.save_shipment(Some(record)).await.is_persisted() {
            warn!(phase = ?record.phase, "Shipment record not persisted");
        }
    }

    async fn clear_record(&self) {
        if !self.store.save_shipment(None).await.is_persisted() {
            warn!("Shipment record not cleared");
        }
    }
}
