//! Async interaction client: one network round-trip per call.
//!
//! Each method builds its request with `InteractionClient`, awaits the
//! transport, then parses. The only suspension point is the transport call.
//! Concurrent calls are independent; nothing is shared but the immutable
//! base URL.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::InteractionClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Interaction;

#[derive(Debug, Clone)]
pub struct InteractionService<T> {
    client: InteractionClient,
    transport: T,
}

impl<T: Transport> InteractionService<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: InteractionClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &InteractionClient {
        &self.client
    }

    /// Fetch the caller's vote on `post_id`. The status is not checked, so a
    /// 404 with a JSON body decodes like any other response.
    pub async fn get<R: DeserializeOwned>(&self, post_id: i64) -> Result<R, ApiError> {
        let response = self.send(Operation::Get, self.client.build_get(post_id)).await?;
        self.client.parse_get(response)
    }

    /// Fetch the caller's votes on every post in `post_ids` with one request.
    pub async fn get_for_user_id(&self, post_ids: &[i64]) -> Result<Vec<Interaction>, ApiError> {
        let request = self.client.build_get_for_user_id(post_ids);
        let response = self.send(Operation::GetForUserId, request).await?;
        self.client.parse_get_for_user_id(response)
    }

    pub async fn add<R: DeserializeOwned>(&self, post_id: i64, score: i32) -> Result<R, ApiError> {
        let request = self.client.build_add(post_id, score)?;
        let response = self.send(Operation::Add, request).await?;
        self.client.parse_add(response).inspect_err(log_rejection)
    }

    pub async fn add_positive<R: DeserializeOwned>(&self, post_id: i64) -> Result<R, ApiError> {
        let request = self.client.build_add_positive(post_id)?;
        let response = self.send(Operation::AddPositive, request).await?;
        self.client.parse_add_positive(response).inspect_err(log_rejection)
    }

    pub async fn add_negative<R: DeserializeOwned>(&self, post_id: i64) -> Result<R, ApiError> {
        let request = self.client.build_add_negative(post_id)?;
        let response = self.send(Operation::AddNegative, request).await?;
        self.client.parse_add_negative(response).inspect_err(log_rejection)
    }

    pub async fn remove<R: DeserializeOwned>(&self, post_id: i64) -> Result<R, ApiError> {
        let response = self.send(Operation::Remove, self.client.build_remove(post_id)).await?;
        self.client.parse_remove(response).inspect_err(log_rejection)
    }

    async fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(%operation, method = %request.method, url = %request.path, "sending interaction request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| ApiError::Transport { operation, source })?;
        debug!(%operation, status = response.status, "interaction response received");
        Ok(response)
    }
}

fn log_rejection(err: &ApiError) {
    if let ApiError::Status { operation, status, .. } = err {
        warn!(%operation, status, "interaction write rejected");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpMethod;

    /// Replays one canned response and records every request it sees.
    struct Canned {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError("connection refused".to_string()))
        }
    }

    fn service<T: Transport>(transport: T) -> InteractionService<T> {
        InteractionService::new(&ClientConfig::new("http://votes.test"), transport)
    }

    #[tokio::test]
    async fn get_resolves_to_backend_object() {
        let svc = service(Canned::new(200, r#"{"id":1,"postId":42,"userId":7,"score":1}"#));
        let value: Value = svc.get(42).await.unwrap();
        assert_eq!(value, json!({"id": 1, "postId": 42, "userId": 7, "score": 1}));
        let requests = svc.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "http://votes.test/api/v1/interaction/42");
    }

    #[tokio::test]
    async fn add_500_rejects_without_retry() {
        let svc = service(Canned::new(500, ""));
        let err = svc.add::<Value>(42, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not add vote");
        assert_eq!(svc.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn get_for_user_id_issues_single_request() {
        let svc = service(Canned::new(200, "[]"));
        let interactions = svc.get_for_user_id(&[1, 2, 3]).await.unwrap();
        assert!(interactions.is_empty());
        let requests = svc.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert!(requests[0].path.ends_with("?postId=1,2,3"));
    }

    #[tokio::test]
    async fn remove_204_is_failure() {
        let svc = service(Canned::new(204, ""));
        let err = svc.remove::<Value>(42).await.unwrap_err();
        assert_eq!(err.status(), Some(204));
        assert_eq!(err.to_string(), "Could not add negative vote");
        let requests = svc.transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let svc = service(Unreachable);
        let err = svc.add_positive::<Value>(1).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport { operation: Operation::AddPositive, .. }
        ));
    }
}
