//! Concurrent fan-out/fan-in of simulated fetches.
//!
//! This module provides the one reusable piece of the service: launching N
//! independent delay-then-return operations and waiting for all of them.
//!
//! # Main Components
//!
//! - [`FetchTask`] - A `(source_name, delay)` pair
//! - [`FetchSource`] - Trait that performs a single fetch
//! - [`run_concurrent`] / [`run_sequential`] - The primitive and its baseline
//! - [`FetchError`] - Why an aggregate failed
//!
//! # Testing
//!
//! See [`mock`] module for a source that records launch/finish order.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
