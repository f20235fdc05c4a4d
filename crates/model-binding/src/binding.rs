//! # Field Bindings
//!
//! A [`Descriptor`] is the static table every model declares: for each field, which
//! HTTP verbs touch it and in which [`Phase`]. The interpreter in
//! [`instance`](crate::instance) reads this table to decide what goes into a request
//! and what is taken back from a response.
//!
//! Descriptors are plain `'static` data, normally written with the [`descriptor!`](crate::descriptor)
//! macro:
//!
//! ```rust
//! use model_binding::{descriptor, Descriptor, Phase, Verb};
//!
//! static DESCRIPTOR: Descriptor = descriptor! {
//!     "k_business" => { get: [get] },
//!     "is_location_select" => { get: [result] },
//! };
//!
//! assert!(DESCRIPTOR.is_bound("k_business", Verb::Get, Phase::Get));
//! assert!(!DESCRIPTOR.is_bound("k_business", Verb::Get, Phase::Result));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// HTTP verb a model can be submitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field travels for a given verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Sent as a request parameter (query string).
    Get,
    /// Sent in the request body.
    Post,
    /// Read back from the response payload.
    Result,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Get => "get",
            Phase::Post => "post",
            Phase::Result => "result",
        }
    }

    /// `true` for phases that put the field on the outgoing request.
    pub fn is_request(self) -> bool {
        matches!(self, Phase::Get | Phase::Post)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phases a single field takes part in for one verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbBinding {
    pub verb: Verb,
    pub phases: &'static [Phase],
}

/// All bindings of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    pub name: &'static str,
    pub verbs: &'static [VerbBinding],
}

impl FieldBinding {
    /// Phases of this field for `verb`; empty when the verb does not touch it.
    pub fn phases(&self, verb: Verb) -> &'static [Phase] {
        self.verbs
            .iter()
            .find(|binding| binding.verb == verb)
            .map(|binding| binding.phases)
            .unwrap_or(&[])
    }

    pub fn is_bound(&self, verb: Verb, phase: Phase) -> bool {
        self.phases(verb).contains(&phase)
    }
}

/// Static field → verb → phase table of one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    fields: &'static [FieldBinding],
}

impl Descriptor {
    pub const fn new(fields: &'static [FieldBinding]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static FieldBinding> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldBinding> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn is_bound(&self, name: &str, verb: Verb, phase: Phase) -> bool {
        self.field(name)
            .is_some_and(|field| field.is_bound(verb, phase))
    }

    /// Names of every field marked `{verb: {phase: true}}`, in declaration order.
    pub fn fields_for(&self, verb: Verb, phase: Phase) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(move |field| field.is_bound(verb, phase))
            .map(|field| field.name)
    }

    /// Whether any field is bound for `verb`.
    pub fn supports(&self, verb: Verb) -> bool {
        self.fields.iter().any(|field| !field.phases(verb).is_empty())
    }

    /// Verbs with at least one bound field.
    pub fn verbs(&self) -> Vec<Verb> {
        Verb::ALL
            .into_iter()
            .filter(|verb| self.supports(*verb))
            .collect()
    }

    /// Renders the table in its wire form: `{"a_field": {field: {verb: {phase: true}}}}`.
    pub fn config(&self) -> Value {
        let mut fields = Map::new();
        for field in self.fields {
            let mut verbs = Map::new();
            for binding in field.verbs {
                let phases = binding
                    .phases
                    .iter()
                    .map(|phase| (phase.as_str().to_string(), Value::Bool(true)))
                    .collect::<Map<_, _>>();
                verbs.insert(binding.verb.as_str().to_string(), Value::Object(phases));
            }
            fields.insert(field.name.to_string(), Value::Object(verbs));
        }
        let mut root = Map::new();
        root.insert("a_field".to_string(), Value::Object(fields));
        Value::Object(root)
    }
}

/// Builds a `'static` [`Descriptor`] from a compact table.
///
/// Each row is `"field" => { verb: [phase, ...], ... }` where verbs are
/// `get | post | put | delete` and phases are `get | post | result`.
#[macro_export]
macro_rules! descriptor {
    (@verb get) => { $crate::Verb::Get };
    (@verb post) => { $crate::Verb::Post };
    (@verb put) => { $crate::Verb::Put };
    (@verb delete) => { $crate::Verb::Delete };
    (@phase get) => { $crate::Phase::Get };
    (@phase post) => { $crate::Phase::Post };
    (@phase result) => { $crate::Phase::Result };
    ($($field:literal => { $($verb:ident : [$($phase:ident),* $(,)?]),* $(,)? }),* $(,)?) => {
        $crate::Descriptor::new(&[
            $($crate::FieldBinding {
                name: $field,
                verbs: &[
                    $($crate::VerbBinding {
                        verb: $crate::descriptor!(@verb $verb),
                        phases: &[$($crate::descriptor!(@phase $phase)),*],
                    }),*
                ],
            }),*
        ])
    };
}
