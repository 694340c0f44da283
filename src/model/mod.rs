//! Pure data structures shared by the store, repository, and sinks.

pub mod order;
pub mod shipment;

pub use order::*;
pub use shipment::*;
