//! Orchestration of the order lifecycle: the add and ship flows, system
//! wiring, and telemetry setup.

pub mod flow;
pub mod system;
pub mod tracing;

pub use flow::{AddReport, FlowError, OrderFlow, ShipError};
pub use system::WarehouseSystem;
