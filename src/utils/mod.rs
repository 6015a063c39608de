//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `tripcast` application.
//!
//! This centralizes reusable components, such as error types and logging
//! setup, to promote consistency and reduce duplication.

pub mod error;
pub mod logging;
