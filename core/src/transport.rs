//! Executors for `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the pure request/response layer and the
//! network. An implementation must hand back non-2xx responses as data and
//! only fail when no response was received at all. No retry, no timeout, no
//! pooling policy lives here beyond what the underlying HTTP client does.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::Jar;

use crate::error::TransportError;
use crate::http::{Credentials, HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// `reqwest`-backed transport with a cookie store carrying the session.
///
/// Requests marked `Credentials::Include` go through a client whose store
/// holds the session cookie; `Credentials::Omit` requests use a bare client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    with_cookies: reqwest::Client,
    without_cookies: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with its own, initially empty, cookie store.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_cookie_jar(Arc::new(Jar::default()))
    }

    /// Transport sharing `jar` with the caller, so a session cookie set
    /// elsewhere (a login call, or `Jar::add_cookie_str`) is attached here.
    pub fn with_cookie_jar(jar: Arc<Jar>) -> Result<Self, TransportError> {
        let with_cookies = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Self::from_client(with_cookies))
    }

    /// Wrap an already configured client for credentialed requests.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            with_cookies: client,
            without_cookies: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = match request.credentials {
            Credentials::Include => &self.with_cookies,
            Credentials::Omit => &self.without_cookies,
        };

        let mut builder = match request.method {
            HttpMethod::Get => client.get(&request.path),
            HttpMethod::Post => client.post(&request.path),
            HttpMethod::Delete => client.delete(&request.path),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
