//! # Model Client
//!
//! [`ModelClient`] is the shared request-execution routine. For any [`ApiModel`] it
//! builds the request from the binding table, hands it to the [`Transport`], writes
//! the result fields back and resets the change baseline.

use crate::binding::Verb;
use crate::error::BindingError;
use crate::instance::Instance;
use crate::model::ApiModel;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Executes model requests over a shared [`Transport`].
///
/// * **Cloneable** – holds only an `Arc` to the transport.
/// * **Generic** – works with any model that implements `ApiModel`.
#[derive(Clone)]
pub struct ModelClient {
    transport: Arc<dyn Transport>,
}

impl ModelClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Submits `instance` with `verb` and returns the fields written from the response.
    #[instrument(skip_all, fields(model = M::model_name(), verb = %verb))]
    pub async fn execute<M: ApiModel>(
        &self,
        instance: &mut Instance<M>,
        verb: Verb,
    ) -> Result<Vec<&'static str>, BindingError> {
        let request = instance.request(verb)?;
        let key = request.key.clone();
        debug!(%key, params = request.params.len(), body = request.body.len(), "Sending request");

        let payload = match self.transport.request(request).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%key, error = %e, "Transport failed");
                return Err(e.into());
            }
        };

        let written = instance.apply_response(verb, &payload)?;
        instance.change_init()?;
        debug!(%key, written = written.len(), "Request complete");
        Ok(written)
    }

    pub async fn get<M: ApiModel>(
        &self,
        instance: &mut Instance<M>,
    ) -> Result<Vec<&'static str>, BindingError> {
        self.execute(instance, Verb::Get).await
    }

    pub async fn post<M: ApiModel>(
        &self,
        instance: &mut Instance<M>,
    ) -> Result<Vec<&'static str>, BindingError> {
        self.execute(instance, Verb::Post).await
    }

    pub async fn put<M: ApiModel>(
        &self,
        instance: &mut Instance<M>,
    ) -> Result<Vec<&'static str>, BindingError> {
        self.execute(instance, Verb::Put).await
    }

    pub async fn delete<M: ApiModel>(
        &self,
        instance: &mut Instance<M>,
    ) -> Result<Vec<&'static str>, BindingError> {
        self.execute(instance, Verb::Delete).await
    }
}
