//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Queue the responses a
//! test expects, run the code under test, then inspect the requests it produced.
//!
//! ## When to use the mock vs a real handler
//!
//! | Feature | MockTransport | TransportServer + handler |
//! |---------|---------------|---------------------------|
//! | **Speed** | Instant | Fast (spawns one task) |
//! | **Determinism** | Fully scripted | Handler decides |
//! | **Use Case** | Checking what a model sends and how it takes the answer | Multi-request flows |
//! | **Error Injection** | Easy (`return_err`) | Handler-specific |
//!
//! ## Example
//!
//! ```rust
//! use model_binding::mock::MockTransport;
//! use model_binding::{descriptor, ApiModel, Descriptor, Instance, KeyField, ModelClient, Verb};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Staff { uid: String, text_name: Option<String> }
//!
//! static STAFF: Descriptor = descriptor! {
//!     "uid" => { get: [get] },
//!     "text_name" => { get: [result] },
//! };
//!
//! impl ApiModel for Staff {
//!     type Key = String;
//!     const RESOURCE: &'static str = "Wl/Staff/Staff.json";
//!     const KEY: &'static [KeyField] = &[KeyField::required("uid")];
//!     fn descriptor() -> &'static Descriptor { &STAFF }
//!     fn from_key(uid: String) -> Self { Self { uid, text_name: None } }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Verb::Get).return_ok(json!({"text_name": "Ann"}));
//!
//!     let client = ModelClient::new(Arc::new(mock.clone()));
//!     let mut staff = Instance::<Staff>::from_key("7".into()).unwrap();
//!     client.get(&mut staff).await.unwrap();
//!
//!     assert_eq!(staff.text_name.as_deref(), Some("Ann"));
//!     assert_eq!(mock.requests()[0].params.get("uid"), Some(&json!("7")));
//!     mock.verify();
//! }
//! ```
//!
//! ## Channel helpers
//!
//! [`create_mock_transport`] returns a [`ChannelTransport`] plus the receiving end, so a
//! test can answer each request by hand with [`expect_request`].

use crate::binding::Verb;
use crate::error::TransportError;
use crate::request::{Payload, WireRequest};
use crate::transport::{ChannelTransport, Responder, Transport, TransportCall};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
struct Expectation {
    verb: Verb,
    resource: Option<&'static str>,
    response: Result<Payload, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<WireRequest>,
}

/// A scripted transport with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next request to use `verb`.
    pub fn expect(&self, verb: Verb) -> ExpectationBuilder {
        ExpectationBuilder {
            verb,
            resource: None,
            state: self.state.clone(),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<WireRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<WireRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: WireRequest) -> Result<Payload, TransportError> {
        let mut state = self.state.lock().unwrap();
        let expectation = state.expectations.pop_front();
        let verb = request.verb;
        let resource = request.resource;
        state.requests.push(request);
        drop(state);

        match expectation {
            Some(exp)
                if exp.verb == verb && exp.resource.map_or(true, |r| r == resource) =>
            {
                exp.response
            }
            Some(exp) => panic!(
                "Unexpected request: got {verb} {resource}, expected {} {}",
                exp.verb,
                exp.resource.unwrap_or("*")
            ),
            None => panic!("Unexpected request: {verb} {resource}"),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    verb: Verb,
    resource: Option<&'static str>,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Also require the request to target `resource`.
    pub fn on(mut self, resource: &'static str) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Answers with `payload`, which must be a JSON object.
    pub fn return_ok(self, payload: Value) {
        let response = match payload {
            Value::Object(map) => Ok(map),
            other => Err(TransportError::Malformed(other.to_string())),
        };
        self.push(response);
    }

    /// Answers with an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Payload, TransportError>) {
        self.state.lock().unwrap().expectations.push_back(Expectation {
            verb: self.verb,
            resource: self.resource,
            response,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a channel transport and the receiver its requests arrive on.
///
/// Useful when a test wants to look at a request *before* deciding the answer.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (ChannelTransport, mpsc::Receiver<TransportCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport::new(sender), receiver)
}

/// Waits for the next request and returns it with its responder.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<TransportCall>,
) -> Option<(WireRequest, Responder)> {
    receiver
        .recv()
        .await
        .map(|call| (call.request, call.respond_to))
}
