//! # Transport
//!
//! The [`Transport`] trait is the seam to whatever actually performs HTTP. This crate
//! ships no HTTP client; instead it provides a channel-backed pair:
//!
//! - [`ChannelTransport`]: cheap to clone, forwards each [`WireRequest`] over a Tokio
//!   mpsc channel and waits for the answer on a oneshot channel.
//! - [`TransportServer`]: owns the receiving end and feeds every request, in order, to
//!   a [`RequestHandler`] running in its own task.
//!
//! The server stops once every `ChannelTransport` clone has been dropped.

use crate::error::TransportError;
use crate::request::{Payload, WireRequest};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Performs a serialized model request and returns the response payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: WireRequest) -> Result<Payload, TransportError>;
}

/// Type alias for the one-shot channel a handler answers on.
pub type Responder = oneshot::Sender<Result<Payload, TransportError>>;

/// A request in flight on a [`ChannelTransport`].
#[derive(Debug)]
pub struct TransportCall {
    pub request: WireRequest,
    pub respond_to: Responder,
}

/// [`Transport`] that forwards requests to a [`TransportServer`].
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<TransportCall>,
}

impl ChannelTransport {
    pub fn new(sender: mpsc::Sender<TransportCall>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn request(&self, request: WireRequest) -> Result<Payload, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TransportCall {
                request,
                respond_to,
            })
            .await
            .map_err(|_| TransportError::Closed)?;
        response.await.map_err(|_| TransportError::Dropped)?
    }
}

/// Answers requests arriving at a [`TransportServer`].
#[async_trait]
pub trait RequestHandler: Send + 'static {
    async fn handle(&mut self, request: WireRequest) -> Result<Payload, TransportError>;
}

/// Sequential request loop on the receiving side of a [`ChannelTransport`].
pub struct TransportServer {
    receiver: mpsc::Receiver<TransportCall>,
}

impl TransportServer {
    pub fn new(buffer_size: usize) -> (Self, ChannelTransport) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, ChannelTransport::new(sender))
    }

    /// Runs until every transport clone is dropped.
    pub async fn run<H: RequestHandler>(mut self, mut handler: H) {
        info!("Transport server started");
        let mut served = 0usize;

        while let Some(TransportCall {
            request,
            respond_to,
        }) = self.receiver.recv().await
        {
            let verb = request.verb;
            let resource = request.resource;
            let key = request.key.clone();
            debug!(%verb, resource, %key, "Request");

            let result = handler.handle(request).await;
            match &result {
                Ok(_) => debug!(%verb, resource, %key, "Request ok"),
                Err(e) => warn!(%verb, resource, %key, error = %e, "Request failed"),
            }
            served += 1;
            let _ = respond_to.send(result);
        }

        info!(served, "Transport server shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Verb;
    use crate::key::IdentityKey;
    use serde_json::{json, Value};

    struct Echo;

    #[async_trait]
    impl RequestHandler for Echo {
        async fn handle(&mut self, request: WireRequest) -> Result<Payload, TransportError> {
            if request.verb == Verb::Delete {
                return Err(TransportError::Status {
                    code: 405,
                    message: "Method not allowed".into(),
                });
            }
            let mut payload = request.params;
            payload.insert("resource".into(), Value::from(request.resource));
            Ok(payload)
        }
    }

    fn request(verb: Verb) -> WireRequest {
        WireRequest {
            verb,
            resource: "Test/Echo.json",
            key: IdentityKey::from(vec!["1".to_string()]),
            params: json!({"k_id": "1"}).as_object().cloned().unwrap(),
            body: Payload::new(),
        }
    }

    #[tokio::test]
    async fn test_channel_round_trip() {
        let (server, transport) = TransportServer::new(4);
        let handle = tokio::spawn(server.run(Echo));

        let payload = transport.request(request(Verb::Get)).await.unwrap();
        assert_eq!(payload.get("k_id"), Some(&json!("1")));
        assert_eq!(payload.get("resource"), Some(&json!("Test/Echo.json")));

        let err = transport.request(request(Verb::Delete)).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { code: 405, .. }));

        drop(transport);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_server() {
        let (server, transport) = TransportServer::new(1);
        drop(server);
        let err = transport.request(request(Verb::Get)).await.unwrap_err();
        assert_eq!(err, TransportError::Closed);
    }
}
