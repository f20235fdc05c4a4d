//! # ApiModel Trait
//!
//! The `ApiModel` trait is the contract every generated model (BusinessConfig,
//! ProfileEditByToken, …) implements so the generic machinery in this crate can drive
//! it. A model is a plain `serde` record; the trait adds what the record alone cannot
//! say: the API resource it talks to, its identity key, its binding [`Descriptor`] and
//! the fields that never leave the client.
//!
//! # Architecture Note
//! The interpreter never looks at concrete field types. It works on the model's wire
//! view (the `serde_json` map produced by `Serialize`) and writes results back through
//! `Deserialize`, so one implementation serves every model.
//!
//! # Field Declarations
//! The wire view must contain every declared field, including `None` values. Do not use
//! `#[serde(skip_serializing_if = ...)]` on model fields: a field missing from the wire
//! view is reported as undeclared when the instance is built.

use crate::binding::Descriptor;
use crate::key::KeyField;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait that any generated model must implement to be handled by [`ModelClient`](crate::ModelClient).
pub trait ApiModel: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Values of the identity key fields, in key order (e.g. `String` or a tuple).
    type Key: Send + Debug;

    /// API resource path, e.g. `Wl/Business/Config/BusinessConfig.json`.
    const RESOURCE: &'static str;

    /// Ordered identity key fields.
    const KEY: &'static [KeyField];

    /// Declared fields that are never transmitted.
    const LOCAL_FIELDS: &'static [&'static str] = &[];

    /// The field → verb → phase table of this model.
    fn descriptor() -> &'static Descriptor;

    /// Builds a default instance addressed by `key`.
    fn from_key(key: Self::Key) -> Self;

    /// Short type name used in logs and errors.
    fn model_name() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
    }
}
