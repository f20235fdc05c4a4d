use crate::model::BusinessConfig;
use model_binding::{descriptor, ApiModel, Descriptor, KeyField};

/// `Wl/Business/Config/BusinessConfig.json` is read-only: the business key goes out as
/// a parameter and everything else comes back.
pub static BUSINESS_CONFIG: Descriptor = descriptor! {
    "a_business_policy" => { get: [result] },
    "is_location_select" => { get: [result] },
    "k_business" => { get: [get] },
};

impl ApiModel for BusinessConfig {
    type Key = String;

    const RESOURCE: &'static str = "Wl/Business/Config/BusinessConfig.json";
    const KEY: &'static [KeyField] = &[KeyField::required("k_business")];

    fn descriptor() -> &'static Descriptor {
        &BUSINESS_CONFIG
    }

    fn from_key(k_business: String) -> Self {
        BusinessConfig::new(k_business)
    }

    fn model_name() -> &'static str {
        "BusinessConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_binding::{BindingError, Instance, Verb};
    use serde_json::json;

    #[test]
    fn test_get_sends_only_the_business_key() {
        let config = Instance::<BusinessConfig>::from_key("abc123".into()).unwrap();
        let request = config.request(Verb::Get).unwrap();

        assert_eq!(request.resource, "Wl/Business/Config/BusinessConfig.json");
        assert_eq!(request.params.get("k_business"), Some(&json!("abc123")));
        assert_eq!(request.field_names().collect::<Vec<_>>(), vec!["k_business"]);
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_write_verbs_are_not_supported() {
        let mut config = Instance::<BusinessConfig>::from_key("abc123".into()).unwrap();
        for verb in [Verb::Post, Verb::Put, Verb::Delete] {
            let err = config.request(verb).unwrap_err();
            assert!(matches!(err, BindingError::VerbNotSupported { .. }));
        }
        assert!(config.apply_response(Verb::Get, &Default::default()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_business_key_is_rejected() {
        let config = Instance::<BusinessConfig>::from_key(String::new()).unwrap();
        let err = config.request(Verb::Get).unwrap_err();
        assert!(matches!(err, BindingError::EmptyKey { .. }));
    }

    #[test]
    fn test_config_shape() {
        assert_eq!(
            BUSINESS_CONFIG.config(),
            json!({
                "a_field": {
                    "a_business_policy": { "get": { "result": true } },
                    "is_location_select": { "get": { "result": true } },
                    "k_business": { "get": { "get": true } }
                }
            })
        );
    }
}
