//! Typed records for the API resources, bound to their endpoints in
//! [`business_config`](crate::business_config) and [`profile_edit`](crate::profile_edit).

mod assoc;
mod flag;

pub mod business_config;
pub mod profile_edit;

pub use business_config::*;
pub use profile_edit::*;
