//! HTTP surface (JSON in, JSON out).
//!
//! - [`AppContext`] - explicitly constructed dependencies, shared as axum state
//! - [`router`] - the route table
//! - [`Validated`] - extractor that decodes a body into a [`Record`](crate::record::Record)
//! - [`ApiError`] - error envelope and status mapping

pub mod context;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use context::*;
pub use error::*;
pub use extract::*;
pub use routes::*;
