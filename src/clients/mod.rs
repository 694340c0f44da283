//! Typed wrappers around the repository actor's message channel.

pub mod repository_client;

pub use repository_client::*;
