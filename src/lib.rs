//! # Tripcast
//!
//! `tripcast` is a real-time trip location relay. Mobile clients push
//! periodic position updates for a trip; web clients subscribe to a trip
//! over a WebSocket and receive every update with minimal latency. Each
//! accepted update is also forwarded, fire-and-forget, to an external
//! durable store over HTTP.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `relay`: the central component that tracks live connections, per-trip
//!   subscriber groups, and fans incoming updates out to them.
//! - `connection`: represents one connected WebSocket client.
//! - `config`: handles loading and merging server configuration.
//! - `persistence`: the fire-and-forget forwarder to the external location store.
//! - `transport`: the two ingress adapters (WebSocket channel and one-shot
//!   HTTP endpoint) plus server wiring.
//! - `utils`: shared utilities such as error types and logging setup.

pub mod config;
pub mod connection;
pub mod persistence;
pub mod relay;
pub mod transport;
pub mod utils;
