//! Validated-record decoding.
//!
//! [`Record`] types are decoded from untyped JSON with field-level rules
//! (required vs defaulted, safe coercions, email format, nesting). Failures are
//! collected into a [`ValidationErrors`] that names every violated field by its
//! dotted path.

pub mod core;
pub mod error;

pub use self::core::*;
pub use error::*;
