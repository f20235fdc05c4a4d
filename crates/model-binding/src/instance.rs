//! # Model Instances
//!
//! [`Instance`] wraps a model value together with its change baseline and is where the
//! binding table is interpreted:
//!
//! - [`Instance::request`] collects the fields bound to phase `get` (params) and `post`
//!   (body) for a verb.
//! - [`Instance::apply_response`] writes the fields bound to phase `result` back from a
//!   response payload, leaving everything else untouched.
//!
//! Building an instance checks the descriptor against the model's declared fields, so
//! a table that names a field the model does not have fails early instead of silently
//! dropping data.

use crate::binding::{Phase, Verb};
use crate::error::BindingError;
use crate::key::IdentityKey;
use crate::model::ApiModel;
use crate::request::{Payload, WireRequest};
use serde_json::Value;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace};

/// A model value plus the snapshot its changes are measured against.
#[derive(Debug, Clone)]
pub struct Instance<M: ApiModel> {
    model: M,
    baseline: Payload,
}

impl<M: ApiModel> Instance<M> {
    /// Wraps `model`, validating its descriptor and recording the clean baseline.
    pub fn new(model: M) -> Result<Self, BindingError> {
        let wire = wire_view(&model)?;
        validate::<M>(&wire)?;
        Ok(Self {
            model,
            baseline: wire,
        })
    }

    /// Builds a fresh instance addressed by `key`.
    pub fn from_key(key: M::Key) -> Result<Self, BindingError> {
        Self::new(M::from_key(key))
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Marks the current field values as clean.
    pub fn change_init(&mut self) -> Result<(), BindingError> {
        self.baseline = wire_view(&self.model)?;
        Ok(())
    }

    /// Declared fields whose value differs from the last [`change_init`](Self::change_init).
    pub fn changed_fields(&self) -> Result<Vec<String>, BindingError> {
        let wire = wire_view(&self.model)?;
        Ok(wire
            .into_iter()
            .filter(|(name, value)| self.baseline.get(name) != Some(value))
            .map(|(name, _)| name)
            .collect())
    }

    pub fn is_changed(&self) -> Result<bool, BindingError> {
        Ok(!self.changed_fields()?.is_empty())
    }

    pub fn identity_key(&self) -> Result<IdentityKey, BindingError> {
        IdentityKey::resolve(M::model_name(), M::KEY, &wire_view(&self.model)?)
    }

    /// Serializes the request for `verb`.
    ///
    /// Only fields marked `{verb: {get: true}}` become params and only fields marked
    /// `{verb: {post: true}}` go into the body. Calling this twice without mutating the
    /// model yields identical requests.
    pub fn request(&self, verb: Verb) -> Result<WireRequest, BindingError> {
        let descriptor = M::descriptor();
        if !descriptor.supports(verb) {
            return Err(BindingError::VerbNotSupported {
                model: M::model_name(),
                verb,
            });
        }

        let wire = wire_view(&self.model)?;
        let key = IdentityKey::resolve(M::model_name(), M::KEY, &wire)?;
        let pick = |phase: Phase| -> Payload {
            descriptor
                .fields_for(verb, phase)
                .filter_map(|name| wire.get(name).map(|v| (name.to_string(), v.clone())))
                .collect()
        };

        let request = WireRequest {
            verb,
            resource: M::RESOURCE,
            key,
            params: pick(Phase::Get),
            body: pick(Phase::Post),
        };
        trace!(model = M::model_name(), %verb, ?request, "Request built");
        Ok(request)
    }

    /// Writes the `result` fields of `verb` from `payload` onto the model.
    ///
    /// Returns the names of the fields that were written. Result fields missing from the
    /// payload keep their value; payload keys that are not result fields are ignored.
    pub fn apply_response(
        &mut self,
        verb: Verb,
        payload: &Payload,
    ) -> Result<Vec<&'static str>, BindingError> {
        let mut wire = wire_view(&self.model)?;
        let mut written = Vec::new();
        for name in M::descriptor().fields_for(verb, Phase::Result) {
            if let Some(value) = payload.get(name) {
                wire.insert(name.to_string(), value.clone());
                written.push(name);
            }
        }

        if written.is_empty() {
            return Ok(written);
        }

        self.model = serde_json::from_value(Value::Object(wire)).map_err(|source| {
            BindingError::Decode {
                model: M::model_name(),
                source,
            }
        })?;
        debug!(model = M::model_name(), %verb, fields = ?written, "Response applied");
        Ok(written)
    }
}

impl<M: ApiModel> Deref for Instance<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.model
    }
}

impl<M: ApiModel> DerefMut for Instance<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

fn wire_view<M: ApiModel>(model: &M) -> Result<Payload, BindingError> {
    let encode = |source| BindingError::Encode {
        model: M::model_name(),
        source,
    };
    match serde_json::to_value(model).map_err(encode)? {
        Value::Object(map) => Ok(map),
        _ => Err(encode(serde::ser::Error::custom("model must serialize to a map"))),
    }
}

fn validate<M: ApiModel>(wire: &Payload) -> Result<(), BindingError> {
    let model = M::model_name();
    let descriptor = M::descriptor();

    for field in descriptor.fields() {
        if !wire.contains_key(field.name) {
            return Err(BindingError::UndeclaredField {
                model,
                field: field.name,
            });
        }
    }
    for key in M::KEY {
        if !wire.contains_key(key.name) {
            return Err(BindingError::UndeclaredField {
                model,
                field: key.name,
            });
        }
    }
    for name in wire.keys() {
        if !descriptor.contains(name) && !M::LOCAL_FIELDS.contains(&name.as_str()) {
            return Err(BindingError::UnboundField {
                model,
                field: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Descriptor;
    use crate::key::KeyField;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Note {
        k_note: String,
        text_body: String,
        dt_saved: Option<String>,
        is_draft: bool,
    }

    static NOTE: Descriptor = crate::descriptor! {
        "k_note" => { get: [get], post: [get, result] },
        "text_body" => { get: [result], post: [post] },
        "dt_saved" => { post: [result] },
    };

    impl ApiModel for Note {
        type Key = String;
        const RESOURCE: &'static str = "Test/Note.json";
        const KEY: &'static [KeyField] = &[KeyField::optional("k_note")];
        const LOCAL_FIELDS: &'static [&'static str] = &["is_draft"];

        fn descriptor() -> &'static Descriptor {
            &NOTE
        }

        fn from_key(k_note: String) -> Self {
            Self {
                k_note,
                ..Self::default()
            }
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Broken {
        k_id: String,
    }

    static BROKEN: Descriptor = crate::descriptor! {
        "k_id" => { get: [get] },
        "s_ghost" => { get: [result] },
    };

    impl ApiModel for Broken {
        type Key = String;
        const RESOURCE: &'static str = "Test/Broken.json";
        const KEY: &'static [KeyField] = &[KeyField::required("k_id")];

        fn descriptor() -> &'static Descriptor {
            &BROKEN
        }

        fn from_key(k_id: String) -> Self {
            Self { k_id }
        }
    }

    #[test]
    fn test_request_splits_params_and_body() {
        let mut note = Instance::<Note>::from_key("n1".into()).unwrap();
        note.text_body = "hello".into();

        let get = note.request(Verb::Get).unwrap();
        assert_eq!(get.params, json!({"k_note": "n1"}).as_object().cloned().unwrap());
        assert!(get.body.is_empty());

        let post = note.request(Verb::Post).unwrap();
        assert_eq!(post.params.get("k_note"), Some(&json!("n1")));
        assert_eq!(post.body.get("text_body"), Some(&json!("hello")));
        assert!(!post.has_field("dt_saved"));
        assert!(!post.has_field("is_draft"));
        assert_eq!(post.key.to_string(), "n1");
    }

    #[test]
    fn test_request_is_idempotent() {
        let note = Instance::<Note>::from_key("n1".into()).unwrap();
        assert_eq!(note.request(Verb::Post).unwrap(), note.request(Verb::Post).unwrap());
    }

    #[test]
    fn test_apply_response_writes_only_result_fields() {
        let mut note = Instance::<Note>::from_key("".into()).unwrap();
        let payload = json!({
            "k_note": "n9",
            "dt_saved": "2024-01-01 10:00:00",
            "text_body": "server copy",
            "extra": 1
        });

        let written = note
            .apply_response(Verb::Post, payload.as_object().unwrap())
            .unwrap();

        assert_eq!(written, vec!["k_note", "dt_saved"]);
        assert_eq!(note.k_note, "n9");
        assert_eq!(note.dt_saved.as_deref(), Some("2024-01-01 10:00:00"));
        // text_body is only a result for GET.
        assert_eq!(note.text_body, "");
    }

    #[test]
    fn test_apply_response_rejects_wrong_shape() {
        let mut note = Instance::<Note>::from_key("n1".into()).unwrap();
        let payload = json!({"text_body": 5});
        let err = note
            .apply_response(Verb::Get, payload.as_object().unwrap())
            .unwrap_err();
        assert!(matches!(err, BindingError::Decode { .. }));
    }

    #[test]
    fn test_change_tracking() {
        let mut note = Instance::<Note>::from_key("n1".into()).unwrap();
        assert!(!note.is_changed().unwrap());

        note.text_body = "draft".into();
        assert_eq!(note.changed_fields().unwrap(), vec!["text_body".to_string()]);

        note.change_init().unwrap();
        assert!(!note.is_changed().unwrap());
    }

    #[test]
    fn test_unsupported_verb() {
        let note = Instance::<Note>::from_key("n1".into()).unwrap();
        let err = note.request(Verb::Delete).unwrap_err();
        assert!(matches!(err, BindingError::VerbNotSupported { verb: Verb::Delete, .. }));
    }

    #[test]
    fn test_descriptor_must_match_model() {
        let err = Instance::<Broken>::from_key("b1".into()).unwrap_err();
        assert!(matches!(err, BindingError::UndeclaredField { field: "s_ghost", .. }));
    }

    #[test]
    fn test_required_key_checked_before_request() {
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        struct Keyed {
            k_id: String,
        }
        static KEYED: Descriptor = crate::descriptor! { "k_id" => { get: [get] } };
        impl ApiModel for Keyed {
            type Key = String;
            const RESOURCE: &'static str = "Test/Keyed.json";
            const KEY: &'static [KeyField] = &[KeyField::required("k_id")];
            fn descriptor() -> &'static Descriptor {
                &KEYED
            }
            fn from_key(k_id: String) -> Self {
                Self { k_id }
            }
        }

        let keyed = Instance::<Keyed>::from_key(String::new()).unwrap();
        let err = keyed.request(Verb::Get).unwrap_err();
        assert!(matches!(err, BindingError::EmptyKey { field: "k_id", .. }));
    }
}
