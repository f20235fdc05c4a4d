use crate::clients::{BusinessConfigClient, ProfileEditClient};
use model_binding::{
    load_config, BindingConfig, ConfigError, InstanceCache, ModelClient, RequestHandler,
    Transport, TransportServer,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Errors raised while shutting a session down.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Transport task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// A server task outlived the shutdown timeout and was aborted.
    #[error("Transport task still running after {0:?}, aborted")]
    Timeout(Duration),
}

/// Owns the clients, their instance caches and any transport task they depend on.
///
/// # Example
///
/// ```ignore
/// let session = SdkSession::with_handler(&BindingConfig::default(), backend);
///
/// let policy = session.business_config.policy("abc123".into()).await?;
/// let uid = session.profile_edit.register(key, registration).await?;
///
/// session.shutdown().await?;
/// ```
pub struct SdkSession {
    pub business_config: BusinessConfigClient,
    pub profile_edit: ProfileEditClient,

    /// Server tasks spawned by the session, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
    shutdown_timeout: Duration,
}

impl SdkSession {
    /// Builds a session on an existing transport. Each model gets its own cache.
    pub fn new(config: &BindingConfig, transport: Arc<dyn Transport>) -> Self {
        let client = ModelClient::new(transport);
        Self {
            business_config: BusinessConfigClient::new(
                client.clone(),
                InstanceCache::new(&config.cache),
            ),
            profile_edit: ProfileEditClient::new(client, InstanceCache::new(&config.cache)),
            handles: Vec::new(),
            shutdown_timeout: config.transport.shutdown_timeout(),
        }
    }

    /// Spawns a [`TransportServer`] answering with `handler` and builds a session on it.
    pub fn with_handler<H: RequestHandler>(config: &BindingConfig, handler: H) -> Self {
        let (server, transport) = TransportServer::new(config.transport.buffer_size);
        let handle = tokio::spawn(server.run(handler));
        info!(buffer_size = config.transport.buffer_size, "Transport server spawned");

        let mut session = Self::new(config, Arc::new(transport));
        session.handles.push(handle);
        session
    }

    /// Like [`with_handler`](Self::with_handler), with settings from [`load_config`].
    pub fn from_config<H: RequestHandler>(
        path: Option<impl AsRef<Path>>,
        handler: H,
    ) -> Result<Self, ConfigError> {
        let config = load_config(path)?;
        Ok(Self::with_handler(&config, handler))
    }

    /// Drops the clients and waits for spawned transport tasks to finish.
    ///
    /// Servers stop once the last transport clone is gone, so requests already queued
    /// are answered first. Clients cloned out of the session keep the transport alive;
    /// a server still running after `transport.shutdown_timeout_ms` is aborted and
    /// [`SessionError::Timeout`] is returned.
    pub async fn shutdown(self) -> Result<(), SessionError> {
        info!("Shutting down session...");
        drop(self.business_config);
        drop(self.profile_edit);

        for mut handle in self.handles {
            match tokio::time::timeout(self.shutdown_timeout, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!("Transport task failed: {:?}", e);
                    return Err(e.into());
                }
                Err(_) => {
                    warn!(timeout = ?self.shutdown_timeout, "Transport task still running, aborting");
                    handle.abort();
                    return Err(SessionError::Timeout(self.shutdown_timeout));
                }
            }
        }

        info!("Session shutdown complete.");
        Ok(())
    }
}
