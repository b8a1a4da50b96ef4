//! Client for the remote interaction (vote) API.
//!
//! # Overview
//! Reads votes on a post or a set of posts, casts positive, negative or
//! arbitrary-score votes, and removes votes against
//! `{origin}/api/v1/interaction`. Every call is a direct pass-through: no
//! caching, no retry, no input validation.
//!
//! # Design
//! - `InteractionClient` is stateless and I/O-free. It holds only the base
//!   URL and splits each operation into `build_*` (produces request) and
//!   `parse_*` (consumes response).
//! - `InteractionService` drives the same operations asynchronously over a
//!   `Transport`; `ReqwestTransport` is the stock one, carrying the session
//!   cookie.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::InteractionClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation, TransportError};
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
pub use service::InteractionService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Interaction, Vote, NEGATIVE_SCORE, POSITIVE_SCORE};
