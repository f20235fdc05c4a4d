use crate::business_config::BusinessConfigError;
use crate::model::{BusinessConfig, BusinessPolicy};
use model_binding::{ApiClient, InstanceCache, ModelClient, SharedInstance};
use tracing::{debug, instrument};

/// Client for business configurations.
#[derive(Clone)]
pub struct BusinessConfigClient {
    inner: ModelClient,
    cache: InstanceCache<BusinessConfig>,
}

impl BusinessConfigClient {
    pub fn new(inner: ModelClient, cache: InstanceCache<BusinessConfig>) -> Self {
        Self { inner, cache }
    }

    /// Returns the cached configuration of `k_business`, refreshed from the server.
    #[instrument(skip(self))]
    pub async fn load(
        &self,
        k_business: String,
    ) -> Result<SharedInstance<BusinessConfig>, BusinessConfigError> {
        let shared = self.instance_get(k_business)?;
        {
            let mut config = shared.lock().await;
            self.get(&mut *config).await?;
        }
        Ok(shared)
    }

    /// Policy of `k_business`. Only asks the server if it has not been loaded yet.
    #[instrument(skip(self))]
    pub async fn policy(&self, k_business: String) -> Result<BusinessPolicy, BusinessConfigError> {
        let shared = self.instance_get(k_business.clone())?;
        let mut config = shared.lock().await;
        if !config.is_loaded() {
            debug!("Policy not cached");
            self.get(&mut *config).await?;
        }
        config
            .a_business_policy
            .clone()
            .ok_or(BusinessConfigError::PolicyMissing(k_business))
    }
}

impl ApiClient<BusinessConfig> for BusinessConfigClient {
    type Error = BusinessConfigError;

    fn inner(&self) -> &ModelClient {
        &self.inner
    }

    fn cache(&self) -> &InstanceCache<BusinessConfig> {
        &self.cache
    }
}
