//! Validated data shapes and request wrappers, all implementing [`Record`](crate::record::Record).

pub mod blog_post;
pub mod person;
pub mod product;
pub mod requests;

pub use blog_post::*;
pub use person::*;
pub use product::*;
pub use requests::*;
