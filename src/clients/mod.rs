//! Model-specific clients on top of [`ModelClient`](model_binding::ModelClient).

pub mod business_config_client;
pub mod profile_edit_client;

pub use business_config_client::*;
pub use profile_edit_client::*;
