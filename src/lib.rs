//! # WellnessLiving SDK Models
//!
//! > **Typed API models bound to their endpoints by static tables.**
//!
//! Each model in this crate is a plain `serde` record plus a binding table that says, per
//! field and per verb, whether the field is a request parameter, part of the request body,
//! or read back from the response. The generic machinery that reads those tables lives in
//! the [`model_binding`] crate; this crate holds the concrete models and their clients.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Records ([`model`])
//! Typed fields for each resource, with `Option` wherever the server may send `null`.
//! - **Key items**: [`BusinessConfig`](model::BusinessConfig),
//!   [`ProfileEditByToken`](model::ProfileEditByToken).
//!
//! ### 2. The Bindings ([`business_config`], [`profile_edit`])
//! The `ApiModel` implementations: resource path, identity key, binding table, plus
//! the error type of each model's client.
//!
//! ### 3. The Interface ([`clients`])
//! Wraps the generic `ModelClient` in model-specific clients with the operations callers
//! actually want (`policy`, `load_form`, `register`, `update`).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`SdkSession`](lifecycle::SdkSession) wires a transport, one instance cache per model,
//! and the clients; `shutdown` waits for any transport task it spawned.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### Transport
//! This crate performs no HTTP itself. Requests go through the
//! [`Transport`](model_binding::Transport) trait; tests and embedders can answer them
//! in-process with a [`RequestHandler`](model_binding::RequestHandler).
//!
//! ### Concurrency
//! Cached instances are shared as `Arc<tokio::sync::Mutex<_>>`. A client holds the lock
//! for the whole request, so two callers never interleave writes to one instance.
//!
//! ### Observability
//! Every client method is instrumented with `tracing`. Call
//! [`setup_tracing`](model_binding::tracing::setup_tracing) and set `RUST_LOG=debug` to
//! see each request and the fields written back.
//!
//! ## 🚀 Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod business_config;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod profile_edit;
