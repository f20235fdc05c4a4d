use crate::model::ProfileEditByToken;
use model_binding::{descriptor, ApiModel, Descriptor, KeyField};

/// `Wl/Profile/Edit/EditByToken.json`.
///
/// GET loads the form, POST creates a user and returns its `uid`, PUT saves
/// `a_change` for an existing user. Error slots are only read back by GET and POST.
pub static PROFILE_EDIT_BY_TOKEN: Descriptor = descriptor! {
    "a_change" => { put: [post], post: [post] },
    "a_error" => { get: [result], post: [result] },
    "a_image_upload" => { post: [post] },
    "a_new" => { post: [post] },
    "a_structure" => { get: [result] },
    "id_register_source" => { get: [get], post: [get] },
    "is_short" => { get: [result], post: [get] },
    "is_sing_in" => { post: [post] },
    "is_staff" => { get: [get], post: [get], put: [get] },
    "k_business" => { get: [get], post: [get], put: [get] },
    "class" => { get: [result], post: [result] },
    "code" => { get: [result], post: [result] },
    "status" => { post: [result] },
    "message" => { get: [result], post: [result] },
    "text_password" => { post: [post] },
    "text_token" => { get: [get] },
    "uid" => { get: [get], post: [get, result], put: [get] },
};

/// Identity of a profile form: business key, user key and staff mode.
pub type ProfileEditKey = (String, String, bool);

impl ApiModel for ProfileEditByToken {
    type Key = ProfileEditKey;

    const RESOURCE: &'static str = "Wl/Profile/Edit/EditByToken.json";
    // An empty business means system-wide fields, an empty uid a new user.
    const KEY: &'static [KeyField] = &[
        KeyField::optional("k_business"),
        KeyField::optional("uid"),
        KeyField::optional("is_staff"),
    ];

    fn descriptor() -> &'static Descriptor {
        &PROFILE_EDIT_BY_TOKEN
    }

    fn from_key((k_business, uid, is_staff): ProfileEditKey) -> Self {
        Self {
            k_business,
            uid,
            is_staff,
            ..Self::default()
        }
    }

    fn model_name() -> &'static str {
        "ProfileEditByToken"
    }
}
