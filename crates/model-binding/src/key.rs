//! # Identity Keys
//!
//! Every model names an ordered list of key fields. Their current values, rendered as
//! strings, form the [`IdentityKey`] used to address the instance on the wire and in
//! the [`InstanceCache`](crate::InstanceCache).

use crate::error::BindingError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One field of a model's identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyField {
    pub name: &'static str,
    /// When set, an empty string is not an acceptable key value.
    pub required: bool,
}

impl KeyField {
    /// Key field that must resolve to a non-empty value.
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    /// Key field where an empty value is meaningful (e.g. "new record").
    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

/// Ordered, resolved values of a model's key fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IdentityKey(Vec<String>);

impl IdentityKey {
    /// Resolves `fields` against the wire view of a model.
    ///
    /// Strings are taken verbatim, numbers in decimal form and booleans as `1`/`0`.
    /// Missing, null and structured values cannot address an instance.
    pub fn resolve(
        model: &'static str,
        fields: &[KeyField],
        values: &Map<String, Value>,
    ) -> Result<Self, BindingError> {
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let part = match values.get(field.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => String::from(if *b { "1" } else { "0" }),
                Some(Value::Null) | None => {
                    return Err(BindingError::MissingKey {
                        model,
                        field: field.name,
                    })
                }
                Some(_) => {
                    return Err(BindingError::InvalidKey {
                        model,
                        field: field.name,
                    })
                }
            };
            if field.required && part.is_empty() {
                return Err(BindingError::EmptyKey {
                    model,
                    field: field.name,
                });
            }
            parts.push(part);
        }
        Ok(Self(parts))
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for IdentityKey {
    fn from(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &[KeyField] = &[
        KeyField::optional("k_business"),
        KeyField::optional("uid"),
        KeyField::optional("is_staff"),
    ];

    fn values(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_resolve_scalars_in_order() {
        let key = IdentityKey::resolve(
            "Profile",
            KEY,
            &values(json!({"uid": "42", "k_business": "7", "is_staff": true})),
        )
        .unwrap();
        assert_eq!(key.parts(), &["7", "42", "1"]);
        assert_eq!(key.to_string(), "7,42,1");
    }

    #[test]
    fn test_optional_fields_accept_empty() {
        let key = IdentityKey::resolve(
            "Profile",
            KEY,
            &values(json!({"uid": "", "k_business": "", "is_staff": false})),
        )
        .unwrap();
        assert_eq!(key.parts(), &["", "", "0"]);
    }

    #[test]
    fn test_required_field_rejects_empty() {
        let err = IdentityKey::resolve(
            "BusinessConfig",
            &[KeyField::required("k_business")],
            &values(json!({"k_business": ""})),
        )
        .unwrap_err();
        assert!(matches!(err, BindingError::EmptyKey { field: "k_business", .. }));
    }

    #[test]
    fn test_null_and_structured_values_rejected() {
        let err = IdentityKey::resolve("M", &[KeyField::optional("a")], &values(json!({"a": null})))
            .unwrap_err();
        assert!(matches!(err, BindingError::MissingKey { field: "a", .. }));

        let err = IdentityKey::resolve("M", &[KeyField::optional("a")], &values(json!({"a": {}})))
            .unwrap_err();
        assert!(matches!(err, BindingError::InvalidKey { field: "a", .. }));
    }
}
