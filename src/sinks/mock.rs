//! # Mock Sink
//!
//! Test double for [`OrderSink`] with scripted outcomes.
//!
//! Queue outcomes with [`MockSink::expect_accept`], [`MockSink::expect_reject`],
//! or [`MockSink::expect_unreachable`]; each `submit` call consumes the next
//! one and records the order it was given. Call [`MockSink::verify`] at the
//! end of a test to assert every scripted outcome was consumed.
//!
//! # Example
//! ```ignore
//! let sink = Arc::new(MockSink::new("warehouse-server"));
//! sink.expect_reject(500, Some("out of disk"));
//! sink.expect_accept();
//! // ... run the flow under test twice ...
//! assert_eq!(sink.submissions().len(), 2);
//! sink.verify();
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::Order;
use crate::sinks::{OrderSink, SinkError};

/// A scripted [`OrderSink`] that records every submission.
pub struct MockSink {
    name: &'static str,
    outcomes: Mutex<VecDeque<Result<(), SinkError>>>,
    submissions: Mutex<Vec<Order>>,
}

impl MockSink {
    /// Creates a mock with no scripted outcomes.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            outcomes: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the next submission to be accepted.
    pub fn expect_accept(&self) {
        self.push(Ok(()));
    }

    /// Scripts the next submission to be rejected with the given status and
    /// optional server message.
    pub fn expect_reject(&self, status: u16, message: Option<&str>) {
        self.push(Err(SinkError::Rejected {
            status,
            message: message.map(str::to_owned),
        }));
    }

    /// Scripts the next submission to fail as if the endpoint were
    /// unreachable.
    pub fn expect_unreachable(&self) {
        // An invalid URL produces a real reqwest error without any network.
        let err = reqwest::Client::new()
            .get("://unreachable")
            .build()
            .expect_err("invalid URL must not build");
        self.push(Err(SinkError::Connectivity(err)));
    }

    /// Orders submitted so far, in call order.
    pub fn submissions(&self) -> Vec<Order> {
        self.submissions.lock().unwrap().clone()
    }

    /// Panics if any scripted outcome was not consumed.
    pub fn verify(&self) {
        let outcomes = self.outcomes.lock().unwrap();
        if !outcomes.is_empty() {
            panic!(
                "MockSink {}: {} scripted outcome(s) not consumed",
                self.name,
                outcomes.len()
            );
        }
    }

    fn push(&self, outcome: Result<(), SinkError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl OrderSink for MockSink {
    fn name(&self) -> &str {
        self.name
    }

    async fn submit(&self, order: &Order) -> Result<(), SinkError> {
        self.submissions.lock().unwrap().push(order.clone());
        match self.outcomes.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => panic!("MockSink {}: submit called with no scripted outcome", self.name),
        }
    }
}
