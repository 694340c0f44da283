//! Single-owner storage of the order collection behind a message channel.
//!
//! See [`actor`] for the event loop and [`crate::clients::RepositoryClient`]
//! for the typed interface the rest of the crate uses.

pub mod actor;
pub mod error;

pub use actor::{new, RepositoryActor, RepositoryRequest, Response};
pub use error::*;
