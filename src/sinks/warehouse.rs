//! Delivery to the local-network warehouse server.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::model::Order;
use crate::sinks::{OrderSink, SinkError};

/// Posts orders to `http://{addr}:{port}/data` on the warehouse LAN.
///
/// The HTTP client is built without a request timeout: a silent endpoint
/// stalls the one in-flight operation, never the process. On rejection the
/// response body is read as JSON and an optional `message` field is carried
/// into the error for the operator-facing alert.
pub struct WarehouseServerSink {
    client: reqwest::Client,
    endpoint: String,
}

impl WarehouseServerSink {
    /// `addr` is taken as entered by the operator; it is not validated as a
    /// well-formed address.
    pub fn new(addr: &str, port: u16) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("http://{addr}:{port}/data"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderSink for WarehouseServerSink {
    fn name(&self) -> &str {
        "warehouse-server"
    }

    #[instrument(skip(self, order), fields(endpoint = %self.endpoint, name = %order.name))]
    async fn submit(&self, order: &Order) -> Result<(), SinkError> {
        let response = self.client.post(&self.endpoint).json(order).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_owned)
                });
            warn!(status = status.as_u16(), "Warehouse server rejected order");
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        debug!("Warehouse server accepted order");
        Ok(())
    }
}
