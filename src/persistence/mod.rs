//! The `persistence` module forwards each accepted update to the external
//! durable location store.
//!
//! The relay itself stores nothing: the write is fire-and-forget over HTTP,
//! strictly decoupled from the fan-out path, and its outcome is only ever
//! logged.

pub mod store_client;
pub use store_client::LocationStore;
