use super::{assoc, flag};
use model_binding::ApiFault;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Client profile form, with access validated by a security token.
///
/// GET returns the form structure for a business, POST registers a new user, PUT
/// saves changes to an existing one. Field bindings live in
/// [`crate::profile_edit`].
///
/// Fields are declared in wire order; requests list them in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileEditByToken {
    /// Fields to change, keyed by `k_field`. Composite fields must be sent whole.
    #[serde(deserialize_with = "assoc::deserialize")]
    pub a_change: Map<String, Value>,
    /// Field errors, `None` when there were none.
    #[serde(deserialize_with = "assoc::deserialize_option")]
    pub a_error: Option<Map<String, Value>>,
    /// User photo data, saved together with the user in staff mode.
    #[serde(deserialize_with = "assoc::deserialize")]
    pub a_image_upload: Map<String, Value>,
    /// Same shape as `a_change`, used by POST when creating a user.
    #[serde(deserialize_with = "assoc::deserialize")]
    pub a_new: Map<String, Value>,
    /// Values and structure of all fields, keyed by `k_field`.
    #[serde(deserialize_with = "assoc::deserialize_option")]
    pub a_structure: Option<BTreeMap<String, FieldStructure>>,
    /// Registration source. `0` means self registration.
    pub id_register_source: i64,
    /// Whether the short registration form is shown.
    #[serde(deserialize_with = "flag::deserialize")]
    pub is_short: bool,
    /// Sign the created user in.
    #[serde(deserialize_with = "flag::deserialize")]
    pub is_sing_in: bool,
    /// Show the form as a staff member rather than as the user.
    #[serde(deserialize_with = "flag::deserialize")]
    pub is_staff: bool,
    /// Business being edited. Empty means system-wide fields.
    pub k_business: String,
    pub class: Option<String>,
    pub code: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
    /// Password for a new user.
    pub text_password: String,
    /// Security token.
    pub text_token: String,
    /// User being edited. Empty for a new user.
    pub uid: String,
}

impl ProfileEditByToken {
    /// The error slots of the last response, if they report a failure.
    pub fn fault(&self) -> Option<ApiFault> {
        ApiFault {
            class: self.class.clone(),
            code: self.code.clone(),
            message: self.message.clone(),
            status: self.status.clone(),
        }
        .into_failure()
    }

    /// Resets the error slots so the next response is judged on its own.
    pub fn clear_fault(&mut self) {
        self.a_error = None;
        self.class = None;
        self.code = None;
        self.status = None;
        self.message = None;
    }

    /// Field errors of the last response, ignoring an empty list.
    pub fn field_errors(&self) -> Option<&Map<String, Value>> {
        self.a_error.as_ref().filter(|errors| !errors.is_empty())
    }

    /// Title of a form field, once the structure is loaded.
    pub fn field_title(&self, k_field: &str) -> Option<&str> {
        self.a_structure
            .as_ref()?
            .get(k_field)
            .map(|field| field.s_title.as_str())
    }

    /// Keys of the required form fields.
    pub fn required_fields(&self) -> Vec<&str> {
        self.a_structure
            .iter()
            .flatten()
            .filter(|(_, field)| field.is_require)
            .map(|(k_field, _)| k_field.as_str())
            .collect()
    }
}

/// One entry of [`ProfileEditByToken::a_structure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStructure {
    /// System field ID, only set for general fields.
    pub id_field_general: Option<Value>,
    #[serde(deserialize_with = "flag::deserialize")]
    pub is_require: bool,
    pub id_field_type: i64,
    /// Copy of the key of this entry.
    pub k_field: String,
    pub s_title: String,
    /// Current value; its shape depends on the field.
    pub x_value: Value,
}
