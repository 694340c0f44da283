//! Delivery to the external spreadsheet webhook.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::model::Order;
use crate::sinks::{OrderSink, SinkError};

/// Posts orders to a fixed spreadsheet webhook URL.
///
/// Unlike the warehouse server, the webhook's failure responses carry no
/// useful body, so only the status code is reported.
pub struct SpreadsheetSink {
    client: reqwest::Client,
    url: String,
}

impl SpreadsheetSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl OrderSink for SpreadsheetSink {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    #[instrument(skip(self, order), fields(name = %order.name))]
    async fn submit(&self, order: &Order) -> Result<(), SinkError> {
        let response = self.client.post(&self.url).json(order).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Spreadsheet rejected order");
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message: None,
            });
        }
        debug!("Spreadsheet accepted order");
        Ok(())
    }
}
