//! Endpoint binding and errors for [`ProfileEditByToken`](crate::model::ProfileEditByToken).

pub mod binding;
pub mod error;

pub use binding::*;
pub use error::*;
