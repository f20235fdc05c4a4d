//! # Instance Cache
//!
//! One [`InstanceCache`] per model type holds the shared instances handed out by
//! `instance_get`. Entries are keyed by the ordered [`IdentityKey`], so asking twice for
//! the same key returns the same `Arc`. Eviction is explicit: a capacity bound and an
//! optional idle timeout from [`CacheConfig`], plus [`evict`](InstanceCache::evict) and
//! [`clear`](InstanceCache::clear).

use crate::config::CacheConfig;
use crate::error::BindingError;
use crate::instance::Instance;
use crate::key::IdentityKey;
use crate::model::ApiModel;
use moka::sync::Cache;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A cached instance. Callers lock it for the duration of a request.
pub type SharedInstance<M> = Arc<Mutex<Instance<M>>>;

/// Identity-keyed cache of shared model instances.
#[derive(Clone)]
pub struct InstanceCache<M: ApiModel> {
    entries: Cache<IdentityKey, SharedInstance<M>>,
}

impl<M: ApiModel> InstanceCache<M> {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);
        if let Some(idle) = config.time_to_idle() {
            builder = builder.time_to_idle(idle);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Returns the cached instance for `key`, creating a default one on first use.
    pub fn instance_get(&self, key: M::Key) -> Result<SharedInstance<M>, BindingError> {
        let instance = Instance::<M>::from_key(key)?;
        let identity = instance.identity_key()?;
        let mut created = false;
        let shared = self.entries.get_with(identity.clone(), || {
            created = true;
            Arc::new(Mutex::new(instance))
        });
        debug!(model = M::model_name(), key = %identity, created, "instance_get");
        Ok(shared)
    }

    pub fn get(&self, key: &IdentityKey) -> Option<SharedInstance<M>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn evict(&self, key: &IdentityKey) {
        debug!(model = M::model_name(), %key, "evict");
        self.entries.invalidate(key);
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Number of live entries, after flushing pending maintenance.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
