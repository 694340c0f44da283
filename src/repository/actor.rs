//! # Repository Actor
//!
//! The order collection lives inside a single task that processes requests
//! sequentially off an mpsc channel. That exclusive ownership is the whole
//! concurrency story: no locks around the collection, no interleaved
//! mutations, and every caller sees the collection through cloned snapshots.
//!
//! Persistence is a side effect of the mutations that are meant to be
//! durable. `Add` and `Remove` write the full collection through the
//! injected [`LocalStore`]; `MarkShipped` deliberately does not, because a
//! shipped entry is only durable once its removal lands (the shipment
//! record tracks the in-between).

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::clients::RepositoryClient;
use crate::model::{Order, OrderStatus};
use crate::repository::RepositoryError;
use crate::store::LocalStore;

/// One-shot response channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, RepositoryError>>;

/// Requests understood by the repository actor.
///
/// Entries are addressed by position; there is no stable order identifier.
/// An index observed through `List` stays valid only until the next
/// mutation, which is acceptable under the single-operator assumption the
/// rest of the system makes.
#[derive(Debug)]
pub enum RepositoryRequest {
    /// Append an order and persist the grown collection. Responds with the
    /// new collection length.
    Add {
        order: Order,
        respond_to: Response<usize>,
    },
    /// Respond with a cloned snapshot of the collection.
    List {
        respond_to: Response<Vec<Order>>,
    },
    /// Flip the entry's status to shipped, in memory only. Responds with
    /// the mutated order.
    MarkShipped {
        index: usize,
        respond_to: Response<Order>,
    },
    /// Remove the entry and persist the shrunken collection. Responds with
    /// the removed order.
    Remove {
        index: usize,
        respond_to: Response<Order>,
    },
}

/// The actor that owns the order collection.
pub struct RepositoryActor {
    receiver: mpsc::Receiver<RepositoryRequest>,
    orders: Vec<Order>,
}

/// Creates a repository actor seeded with a previously loaded collection,
/// plus the client used to talk to it.
pub fn new(buffer_size: usize, seed: Vec<Order>) -> (RepositoryActor, RepositoryClient) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let actor = RepositoryActor {
        receiver,
        orders: seed,
    };
    (actor, RepositoryClient::new(sender))
}

impl RepositoryActor {
    /// Runs the actor's event loop until every client is dropped.
    ///
    /// The store is injected here rather than at construction so the caller
    /// can load the seed collection from the same store first.
    pub async fn run(mut self, store: LocalStore) {
        info!(size = self.orders.len(), "Repository started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RepositoryRequest::Add { order, respond_to } => {
                    debug!(name = %order.name, "Add");
                    self.orders.push(order);
                    let outcome = store.save_orders(&self.orders).await;
                    if !outcome.is_persisted() {
                        warn!(size = self.orders.len(), "Collection not persisted after add");
                    }
                    info!(size = self.orders.len(), "Order appended");
                    let _ = respond_to.send(Ok(self.orders.len()));
                }
                RepositoryRequest::List { respond_to } => {
                    debug!(size = self.orders.len(), "List");
                    let _ = respond_to.send(Ok(self.orders.clone()));
                }
                RepositoryRequest::MarkShipped { index, respond_to } => {
                    debug!(index, "MarkShipped");
                    match self.orders.get_mut(index) {
                        Some(order) => {
                            order.status = OrderStatus::Shipped;
                            info!(index, name = %order.name, "Order marked shipped in memory");
                            let _ = respond_to.send(Ok(order.clone()));
                        }
                        None => {
                            warn!(index, size = self.orders.len(), "Index out of range");
                            let _ = respond_to.send(Err(RepositoryError::IndexOutOfRange(index)));
                        }
                    }
                }
                RepositoryRequest::Remove { index, respond_to } => {
                    debug!(index, "Remove");
                    if index < self.orders.len() {
                        let removed = self.orders.remove(index);
                        let outcome = store.save_orders(&self.orders).await;
                        if !outcome.is_persisted() {
                            warn!(size = self.orders.len(), "Collection not persisted after remove");
                        }
                        info!(index, name = %removed.name, size = self.orders.len(), "Order removed");
                        let _ = respond_to.send(Ok(removed));
                    } else {
                        warn!(index, size = self.orders.len(), "Index out of range");
                        let _ = respond_to.send(Err(RepositoryError::IndexOutOfRange(index)));
                    }
                }
            }
        }

        info!(size = self.orders.len(), "Repository shutdown");
    }
}
