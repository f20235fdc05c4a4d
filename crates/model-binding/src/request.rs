//! # Wire Requests
//!
//! The flat request handed to a [`Transport`](crate::Transport). Parameters carry the
//! fields bound to phase `get`, the body carries the fields bound to phase `post`.

use crate::binding::Verb;
use crate::key::IdentityKey;
use serde::Serialize;
use serde_json::{Map, Value};

/// Flat key → value payload used for params, bodies and responses.
pub type Payload = Map<String, Value>;

/// A fully serialized model request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireRequest {
    pub verb: Verb,
    pub resource: &'static str,
    pub key: IdentityKey,
    pub params: Payload,
    pub body: Payload,
}

impl WireRequest {
    /// Looks a field up in params first, then in the body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.params.get(name).or_else(|| self.body.get(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of every transmitted field (params and body).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().chain(self.body.keys()).map(String::as_str)
    }
}
