//! The `connection` module defines the representation of a client session.
//!
//! It provides the `Connection` struct, which encapsulates the state of a
//! single connected client, including its unique identifier and the channel
//! for sending frames to it.

pub mod connection;
pub use connection::{Connection, ConnectionId};

#[cfg(test)]
mod tests;
