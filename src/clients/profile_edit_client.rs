use crate::model::ProfileEditByToken;
use crate::profile_edit::{ProfileEditError, ProfileEditKey};
use model_binding::{ApiClient, Instance, InstanceCache, ModelClient, SharedInstance};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

/// Data for a new user.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    /// Field values keyed by `k_field`.
    pub fields: Map<String, Value>,
    pub password: String,
    /// Sign the user in once created.
    pub sign_in: bool,
    /// Registration source, `0` for self registration.
    pub source: i64,
}

/// Client for profile forms validated by a security token.
#[derive(Clone)]
pub struct ProfileEditClient {
    inner: ModelClient,
    cache: InstanceCache<ProfileEditByToken>,
}

impl ProfileEditClient {
    pub fn new(inner: ModelClient, cache: InstanceCache<ProfileEditByToken>) -> Self {
        Self { inner, cache }
    }

    /// Loads the form for `key` with the security `token`.
    ///
    /// The returned instance holds `a_structure`, the fields and their current values.
    #[instrument(skip(self, token))]
    pub async fn load_form(
        &self,
        key: ProfileEditKey,
        token: String,
    ) -> Result<SharedInstance<ProfileEditByToken>, ProfileEditError> {
        let shared = self.instance_get(key)?;
        {
            let mut form = shared.lock().await;
            form.text_token = token;
            // Slots missing from the response must not report an earlier failure.
            form.clear_fault();
            self.get(&mut *form).await?;
            if let Some(fault) = form.fault() {
                return Err(ProfileEditError::Rejected(fault));
            }
        }
        Ok(shared)
    }

    /// Creates a user and returns the `uid` the server assigned.
    ///
    /// The request goes out on a fresh form, so a cached new-user form for the same
    /// key keeps its structure.
    #[instrument(skip(self, registration))]
    pub async fn register(
        &self,
        key: ProfileEditKey,
        registration: Registration,
    ) -> Result<String, ProfileEditError> {
        let mut form = Instance::<ProfileEditByToken>::from_key(key)?;
        form.a_change = registration.fields.clone();
        form.a_new = registration.fields;
        form.text_password = registration.password;
        form.is_sing_in = registration.sign_in;
        form.id_register_source = registration.source;

        self.post(&mut form).await?;

        if let Some(fault) = form.fault() {
            return Err(ProfileEditError::Rejected(fault));
        }
        if let Some(errors) = form.field_errors() {
            return Err(ProfileEditError::InvalidFields(errors.keys().cloned().collect()));
        }
        if form.uid.is_empty() {
            return Err(ProfileEditError::MissingUid);
        }
        info!(uid = %form.uid, "User registered");
        Ok(form.into_model().uid)
    }

    /// Saves `changes` (keyed by `k_field`) for an existing user.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        key: ProfileEditKey,
        changes: Map<String, Value>,
    ) -> Result<(), ProfileEditError> {
        let shared = self.instance_get(key)?;
        let mut form = shared.lock().await;
        debug!(fields = changes.len(), "Saving changes");
        form.a_change = changes;
        self.put(&mut *form).await
    }
}

impl ApiClient<ProfileEditByToken> for ProfileEditClient {
    type Error = ProfileEditError;

    fn inner(&self) -> &ModelClient {
        &self.inner
    }

    fn cache(&self) -> &InstanceCache<ProfileEditByToken> {
        &self.cache
    }
}
