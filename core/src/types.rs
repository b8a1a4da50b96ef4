//! Domain DTOs for the interaction API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently,
//! so integration tests catch any schema drift between the two crates. Wire
//! names are camelCase to match the remote service.

use serde::{Deserialize, Serialize};

/// Score sent by `add_positive`.
pub const POSITIVE_SCORE: i32 = 1;
/// Score sent by `add_negative`.
pub const NEGATIVE_SCORE: i32 = -1;

/// A user's vote on a post, as stored by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: i64,
    pub post_id: i64,
    /// Inferred by the service from the session; never sent by the client.
    pub user_id: i64,
    pub score: i32,
}

/// Request payload for casting a vote. Any score is transmitted as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub post_id: i64,
    pub score: i32,
}
