//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by the
//! `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Requests**: `ModelClient::execute` opens a span with `model` and `verb`, and logs
//!   the identity key and how many params/body fields were sent.
//! - **Responses**: which result fields were written back.
//! - **Cache**: `instance_get` hits and misses, evictions.
//! - **Transport server**: startup, each request, failures, shutdown.
//!
//! ```bash
//! RUST_LOG=info cargo test            # lifecycle only
//! RUST_LOG=debug cargo test           # every request and response
//! RUST_LOG=model_binding=trace cargo test  # full request payloads
//! ```
//!
//! With `RUST_LOG=debug` a profile registration looks like:
//!
//! ```text
//! DEBUG execute{model="ProfileEditByToken" verb=post}: Sending request key=,,0 params=5 body=5
//! DEBUG execute{model="ProfileEditByToken" verb=post}: Response applied fields=["status", "uid"]
//! DEBUG execute{model="ProfileEditByToken" verb=post}: Request complete key=,,0 written=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
