#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Typed Gather
//!
//! > **Typed records and concurrent fetches, served over HTTP.**
//!
//! This crate demonstrates two unrelated ideas behind one small JSON API:
//!
//! - **Validated records**: untyped JSON is decoded into strongly typed records
//!   (`Person`, `Product`, `BlogPost` + `Author`) with required fields, defaults,
//!   safe coercions and nested paths in every error.
//! - **Fan-out/fan-in**: N simulated fetches are launched together and awaited
//!   together. The total time is the *longest* delay, not the sum, and results
//!   come back in the order the tasks were submitted.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a trait for the fetch?
//! [`run_concurrent`](framework::run_concurrent) is written once against
//! [`FetchSource`](framework::FetchSource). The server plugs in the simulated
//! source; tests plug in [`MockSource`](framework::mock::MockSource) to watch the
//! launch and completion order and to inject failures.
//!
//! ### Why hand-written decoding?
//! Field rules (numeric strings are numbers, booleans are never strings, emails
//! need an `@` and a dot) are explicit in each record's [`Decode`](record::Decode)
//! impl, and every violated field is reported with its path (`author.email`,
//! `tasks.1.delay`) instead of stopping at the first one.
//!
//! ### Why an enum for operations?
//! `square`, `double` and `cube` are variants of
//! [`Operation`](transform::Operation), dispatched through a `match`. Adding an
//! operation without implementing it does not compile.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The fan-out/fan-in primitive, its sequential baseline, and timing helpers.
//!
//! ### 2. The Rules ([`record`], [`model`])
//! The decoding machinery and the concrete records built with it.
//!
//! ### 3. The Transforms ([`transform`])
//! Word capitalisation and numeric operation dispatch.
//!
//! ### 4. The Interface ([`server`])
//! Route table, handlers, the [`Validated`](server::Validated) extractor and the
//! JSON error envelope.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, tracing, and the [`App`](lifecycle::App) that binds and serves.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! curl -s localhost:8000/async-demo
//! curl -s -XPOST localhost:8000/fetch-concurrent -H 'content-type: application/json' \
//!   -d '{"tasks":[{"source_name":"A","delay":2},{"source_name":"B","delay":1}]}'
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod record;
pub mod server;
pub mod transform;
