//! Session setup and shutdown.

pub mod session;

pub use session::*;
