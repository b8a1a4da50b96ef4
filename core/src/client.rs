//! Stateless HTTP request builder and response parser for the interaction API.
//!
//! # Design
//! `InteractionClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is left to the caller (see
//! `InteractionService` for the async path).
//!
//! Reads never look at the status: whatever comes back is decoded. Writes and
//! deletes accept exactly 200.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Interaction, Vote, NEGATIVE_SCORE, POSITIVE_SCORE};

/// The only status a write or delete treats as success.
const WRITE_SUCCESS_STATUS: u16 = 200;

/// Synchronous, stateless client for the interaction API.
#[derive(Debug, Clone)]
pub struct InteractionClient {
    base_url: String,
}

impl InteractionClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.resource_url(),
        }
    }

    /// Shorthand for `InteractionClient::new(&ClientConfig::new(origin))`.
    pub fn with_origin(origin: &str) -> Self {
        Self::new(&ClientConfig::new(origin))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, post_id: i64) -> HttpRequest {
        read_request(format!("{}/{post_id}", self.base_url))
    }

    /// Ids are joined with a bare `,`; an empty slice still yields `?postId=`.
    pub fn build_get_for_user_id(&self, post_ids: &[i64]) -> HttpRequest {
        let joined = post_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        read_request(format!("{}?postId={joined}", self.base_url))
    }

    pub fn build_add(&self, post_id: i64, score: i32) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Vote { post_id, score })
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            credentials: Credentials::Include,
        })
    }

    pub fn build_add_positive(&self, post_id: i64) -> Result<HttpRequest, ApiError> {
        self.build_add(post_id, POSITIVE_SCORE)
    }

    pub fn build_add_negative(&self, post_id: i64) -> Result<HttpRequest, ApiError> {
        self.build_add(post_id, NEGATIVE_SCORE)
    }

    pub fn build_remove(&self, post_id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}?postId={post_id}", self.base_url),
            headers: Vec::new(),
            body: None,
            credentials: Credentials::Include,
        }
    }

    /// Decode whatever the service returned into the caller's type. The
    /// status is not checked.
    pub fn parse_get<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(Operation::Get, &response)
    }

    pub fn parse_get_for_user_id(&self, response: HttpResponse) -> Result<Vec<Interaction>, ApiError> {
        decode(Operation::GetForUserId, &response)
    }

    pub fn parse_add<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        parse_write(Operation::Add, response)
    }

    pub fn parse_add_positive<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        parse_write(Operation::AddPositive, response)
    }

    pub fn parse_add_negative<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        parse_write(Operation::AddNegative, response)
    }

    /// Only 200 counts as success; a 204 is reported as a failure.
    pub fn parse_remove<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        parse_write(Operation::Remove, response)
    }
}

fn read_request(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
        credentials: Credentials::Include,
    }
}

fn parse_write<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, ApiError> {
    check_status(operation, &response)?;
    decode(operation, &response)
}

/// Map any status other than 200 to `ApiError::Status`.
fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == WRITE_SUCCESS_STATUS {
        return Ok(());
    }
    Err(ApiError::Status {
        operation,
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(operation: Operation, response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode {
        operation,
        status: response.status,
        message: e.to_string(),
    })
}
