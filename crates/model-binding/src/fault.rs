//! Error slots (`class`, `code`, `message`, `status`) that many models carry as
//! result fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-reported failure as modeled by result fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFault {
    /// Exception class name.
    pub class: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    /// Request status.
    pub status: Option<String>,
}

impl ApiFault {
    /// `true` when nothing reports a failure: all slots null, or only an `"ok"` status.
    pub fn is_success(&self) -> bool {
        self.class.is_none()
            && self.code.is_none()
            && self.message.is_none()
            && self.status.as_deref().map_or(true, |status| status == "ok")
    }

    /// `Some(self)` when the slots describe a failure.
    pub fn into_failure(self) -> Option<Self> {
        (!self.is_success()).then_some(self)
    }
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.as_deref().unwrap_or("unknown");
        match (&self.class, &self.message) {
            (Some(class), Some(message)) => write!(f, "{class} [{code}]: {message}"),
            (None, Some(message)) => write!(f, "[{code}]: {message}"),
            (Some(class), None) => write!(f, "{class} [{code}]"),
            (None, None) => write!(f, "[{code}] status={}", self.status.as_deref().unwrap_or("")),
        }
    }
}
