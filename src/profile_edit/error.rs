//! Error types for profile form requests.

use model_binding::{ApiFault, BindingError};
use thiserror::Error;

/// Errors that can occur while loading or submitting a profile form.
#[derive(Debug, Error)]
pub enum ProfileEditError {
    /// The server reported a failure in the error slots.
    #[error("Profile request rejected: {0}")]
    Rejected(ApiFault),

    /// The server rejected individual fields; keys are `k_field` values.
    #[error("Profile fields rejected: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    /// Registration succeeded without returning a user key.
    #[error("Registration returned no uid")]
    MissingUid,

    /// Building, sending or applying the request failed.
    #[error(transparent)]
    Binding(#[from] BindingError),
}
