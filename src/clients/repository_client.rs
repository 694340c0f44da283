use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::model::Order;
use crate::repository::{RepositoryError, RepositoryRequest};

/// Type-safe handle for talking to the repository actor.
///
/// Cheap to clone; every clone feeds the same actor. When the last clone is
/// dropped the actor's channel closes and its loop exits.
#[derive(Clone)]
pub struct RepositoryClient {
    sender: mpsc::Sender<RepositoryRequest>,
}

impl RepositoryClient {
    pub(crate) fn new(sender: mpsc::Sender<RepositoryRequest>) -> Self {
        Self { sender }
    }

    /// Appends an order to the collection; returns the new length.
    #[instrument(skip(self, order), fields(name = %order.name))]
    pub async fn add(&self, order: Order) -> Result<usize, RepositoryError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Add { order, respond_to })
            .await
            .map_err(|_| RepositoryError::ActorClosed)?;
        response.await.map_err(|_| RepositoryError::ActorDropped)?
    }

    /// Returns a read-only snapshot of the collection.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::List { respond_to })
            .await
            .map_err(|_| RepositoryError::ActorClosed)?;
        response.await.map_err(|_| RepositoryError::ActorDropped)?
    }

    /// Flips the entry at `index` to shipped (in memory only) and returns
    /// the mutated order.
    #[instrument(skip(self))]
    pub async fn mark_shipped(&self, index: usize) -> Result<Order, RepositoryError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::MarkShipped { index, respond_to })
            .await
            .map_err(|_| RepositoryError::ActorClosed)?;
        response.await.map_err(|_| RepositoryError::ActorDropped)?
    }

    /// Removes the entry at `index` and returns it.
    #[instrument(skip(self))]
    pub async fn remove(&self, index: usize) -> Result<Order, RepositoryError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RepositoryRequest::Remove { index, respond_to })
            .await
            .map_err(|_| RepositoryError::ActorClosed)?;
        response.await.map_err(|_| RepositoryError::ActorDropped)?
    }
}
