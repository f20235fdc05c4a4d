//! # ApiClient Trait
//!
//! Gives model-specific clients `instance_get`, `get`, `post` and `put` on top of a
//! [`ModelClient`] and an [`InstanceCache`], mapped into the client's own error type.
use crate::{ApiModel, BindingError, InstanceCache, ModelClient, SharedInstance};
use async_trait::async_trait;

/// Trait for model-specific clients to inherit the standard verb operations.
///
/// # Example
///
/// ```rust
/// use model_binding::{descriptor, ApiClient, ApiModel, BindingError, CacheConfig, Descriptor,
///     InstanceCache, KeyField, ModelClient};
/// use serde::{Deserialize, Serialize};
///
/// // 1. Define the model
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Location { k_location: String, text_title: Option<String> }
///
/// static LOCATION: Descriptor = descriptor! {
///     "k_location" => { get: [get] },
///     "text_title" => { get: [result] },
/// };
///
/// impl ApiModel for Location {
///     type Key = String;
///     const RESOURCE: &'static str = "Wl/Location/Location.json";
///     const KEY: &'static [KeyField] = &[KeyField::required("k_location")];
///     fn descriptor() -> &'static Descriptor { &LOCATION }
///     fn from_key(k_location: String) -> Self { Self { k_location, text_title: None } }
/// }
///
/// // 2. Define the client wrapper
/// #[derive(Debug, thiserror::Error)]
/// #[error(transparent)]
/// struct LocationError(#[from] BindingError);
///
/// struct LocationClient { inner: ModelClient, cache: InstanceCache<Location> }
///
/// // 3. Implement ApiClient
/// impl ApiClient<Location> for LocationClient {
///     type Error = LocationError;
///     fn inner(&self) -> &ModelClient { &self.inner }
///     fn cache(&self) -> &InstanceCache<Location> { &self.cache }
/// }
///
/// // 4. Usage: instance_get() and get() are provided.
/// async fn usage(client: LocationClient) -> Result<Option<String>, LocationError> {
///     let shared = client.instance_get("42".to_string())?;
///     let mut location = shared.lock().await;
///     client.get(&mut location).await?;
///     Ok(location.text_title.clone())
/// }
/// # let _ = CacheConfig::default();
/// ```
#[async_trait]
pub trait ApiClient<M: ApiModel>: Send + Sync {
    /// The model-specific error type.
    type Error: From<BindingError> + Send + Sync;

    /// Access the inner generic ModelClient.
    fn inner(&self) -> &ModelClient;

    /// Access the cache of shared instances of `M`.
    fn cache(&self) -> &InstanceCache<M>;

    /// Returns the cached instance for `key`, creating it on first use.
    #[tracing::instrument(skip(self))]
    fn instance_get(&self, key: M::Key) -> Result<SharedInstance<M>, Self::Error> {
        self.cache().instance_get(key).map_err(Self::Error::from)
    }

    /// Loads the instance with GET.
    #[tracing::instrument(skip_all, fields(model = M::model_name()))]
    async fn get(&self, instance: &mut crate::Instance<M>) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(instance).await.map(drop).map_err(Self::Error::from)
    }

    /// Submits the instance with POST.
    #[tracing::instrument(skip_all, fields(model = M::model_name()))]
    async fn post(&self, instance: &mut crate::Instance<M>) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().post(instance).await.map(drop).map_err(Self::Error::from)
    }

    /// Submits the instance with PUT.
    #[tracing::instrument(skip_all, fields(model = M::model_name()))]
    async fn put(&self, instance: &mut crate::Instance<M>) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().put(instance).await.map(drop).map_err(Self::Error::from)
    }
}
