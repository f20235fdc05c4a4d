//! Error types for business configuration requests.

use model_binding::BindingError;
use thiserror::Error;

/// Errors that can occur while loading a business configuration.
#[derive(Debug, Error)]
pub enum BusinessConfigError {
    /// The server answered without a policy for the business.
    #[error("Business {0} has no policy")]
    PolicyMissing(String),

    /// Building, sending or applying the request failed.
    #[error(transparent)]
    Binding(#[from] BindingError),
}
