//! Endpoint binding and errors for [`BusinessConfig`](crate::model::BusinessConfig).

pub mod binding;
pub mod error;

pub use binding::*;
pub use error::*;
