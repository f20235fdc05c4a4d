//! # Model Binding
//!
//! This crate provides the generic machinery behind the SDK's generated models. A model
//! is a plain typed record; what makes it talk to the API is a static **binding table**
//! that says, per field and per HTTP verb, whether the field is sent as a request
//! parameter, sent in the request body, or read back from the response.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Declaration Layer** ([`ApiModel`], [`Descriptor`]) - what each model looks like
//!    on the wire: resource path, identity key, field bindings.
//! 2. **Interpretation Layer** ([`Instance`]) - turns a model into a [`WireRequest`]
//!    for a verb and writes response fields back. Written **once**, used by every model.
//! 3. **Execution Layer** ([`ModelClient`], [`ApiClient`], [`InstanceCache`]) - runs
//!    requests over a [`Transport`] and hands out shared, identity-keyed instances.
//!
//! ## Declaring a Model
//!
//! ```rust
//! use model_binding::{descriptor, ApiModel, Descriptor, Instance, KeyField, Phase, Verb};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Visit {
//!     k_visit: String,
//!     text_note: String,
//!     dt_date: Option<String>,
//! }
//!
//! static VISIT: Descriptor = descriptor! {
//!     "k_visit" => { get: [get], put: [get] },
//!     "text_note" => { put: [post] },
//!     "dt_date" => { get: [result] },
//! };
//!
//! impl ApiModel for Visit {
//!     type Key = String;
//!     const RESOURCE: &'static str = "Wl/Visit/Visit.json";
//!     const KEY: &'static [KeyField] = &[KeyField::required("k_visit")];
//!     fn descriptor() -> &'static Descriptor { &VISIT }
//!     fn from_key(k_visit: String) -> Self {
//!         Self { k_visit, text_note: String::new(), dt_date: None }
//!     }
//! }
//!
//! let mut visit = Instance::<Visit>::from_key("v1".into()).unwrap();
//! visit.text_note = "Late arrival".into();
//!
//! let put = visit.request(Verb::Put).unwrap();
//! assert!(put.params.contains_key("k_visit"));
//! assert!(put.body.contains_key("text_note"));
//!
//! // text_note is only bound for PUT, so a GET never carries it.
//! let get = visit.request(Verb::Get).unwrap();
//! assert!(!get.has_field("text_note"));
//! assert!(VISIT.is_bound("dt_date", Verb::Get, Phase::Result));
//! ```
//!
//! ## Concurrency Model
//!
//! Models have no internal locking. Cached instances are `Arc<tokio::sync::Mutex<_>>`,
//! so callers serialize access explicitly by holding the lock across a request. The
//! channel transport processes requests **sequentially** in a single task.
//!
//! ## Testing
//!
//! [`mock::MockTransport`] scripts transport responses and records requests, so model
//! bindings can be checked without any server. See the [`mock`] module.

pub mod binding;
pub mod cache;
pub mod client;
pub mod client_trait;
pub mod config;
pub mod error;
pub mod fault;
pub mod instance;
pub mod key;
pub mod mock;
pub mod model;
pub mod request;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use binding::{Descriptor, FieldBinding, Phase, Verb, VerbBinding};
pub use cache::{InstanceCache, SharedInstance};
pub use client::ModelClient;
pub use client_trait::ApiClient;
pub use crate::config::{load_config, BindingConfig, CacheConfig, ConfigError, TransportConfig};
pub use error::{BindingError, TransportError};
pub use fault::ApiFault;
pub use instance::Instance;
pub use key::{IdentityKey, KeyField};
pub use model::ApiModel;
pub use request::{Payload, WireRequest};
pub use transport::{ChannelTransport, RequestHandler, Responder, Transport, TransportCall, TransportServer};
