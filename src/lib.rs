//! # Stockroom
//!
//! > **The order-tracking core of a small warehouse app.**
//!
//! This crate keeps a list of stored orders durable on disk and pushes them
//! to two remote systems — a warehouse server on the local network and an
//! external spreadsheet webhook — at the right points of their lifecycle.
//! Screens and widgets live elsewhere; this is everything underneath them.
//!
//! ## 🏗️ Design
//!
//! ### One owner for the collection
//! The order collection is owned by a single actor task
//! ([`repository::RepositoryActor`]) that processes requests sequentially
//! from a channel. No locks, no interleaved mutations; callers hold a
//! [`clients::RepositoryClient`] and receive cloned snapshots.
//!
//! ### Two endpoints, one commit
//! Shipping an order only removes it locally after **both** remote
//! endpoints accept it. Progress is tracked in a persisted
//! [`model::ShipmentRecord`] (`Pending → ServerAcked → FullyAcked`), so an
//! interrupted or failed ship can be retried without re-posting to an
//! endpoint that already said yes. See [`lifecycle::OrderFlow`] for the
//! exact sequencing, including the deliberate window where the in-memory
//! status runs ahead of the persisted snapshot.
//!
//! ### Failures stay small
//! Store reads fall back to an empty collection; store writes report a
//! [`store::SaveOutcome`] that is logged and never blocks the flow; a
//! rejected or unreachable endpoint stops one operation and becomes an
//! operator-facing message. Nothing here takes the process down.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] — `Order`, its status labels, drafts, shipment records.
//! - [`store`] — JSON-file key-value persistence.
//! - [`repository`] — the actor owning the collection.
//! - [`clients`] — the typed channel wrapper.
//! - [`sinks`] — the `OrderSink` trait, the two HTTP implementations, and
//!   a scripted mock for tests.
//! - [`lifecycle`] — `OrderFlow` (add/ship), `WarehouseSystem` (wiring,
//!   startup recovery, shutdown), tracing setup.
//! - [`config`] — endpoint addresses and ship-flow switches.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use stockroom::config::SyncConfig;
//! use stockroom::lifecycle::WarehouseSystem;
//! use stockroom::model::OrderDraft;
//!
//! let config = SyncConfig::new("192.168.1.61", "https://example.com/hook");
//! let system = WarehouseSystem::start(config, "./data").await?;
//!
//! system.flow.add_order(OrderDraft {
//!     name: "Widget".into(),
//!     sender: "Alice".into(),
//!     zone: "A".into(),
//!     shelf: "3".into(),
//!     position: "2".into(),
//! }).await?;
//!
//! system.flow.ship_order(Some(0)).await?;
//! system.shutdown().await?;
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod sinks;
pub mod store;
