//! Error types for the interaction API client.
//!
//! # Design
//! Write and delete operations recognize exactly one failure kind, a status
//! other than 200, which lands in `Status` along with the observed status and
//! body. Its `Display` is the fixed, operation-specific message callers have
//! always seen. Reads never check the status; a body that does not decode
//! lands in `Decode` with the status that came with it.

use std::fmt;

use thiserror::Error;

/// The six operations the client exposes, used to tag errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    GetForUserId,
    Add,
    AddPositive,
    AddNegative,
    Remove,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::GetForUserId => "getForUserId",
            Operation::Add => "add",
            Operation::AddPositive => "addPositive",
            Operation::AddNegative => "addNegative",
            Operation::Remove => "remove",
        }
    }

    /// Message reported when the operation gets a non-200 status.
    ///
    /// `Remove` reuses the negative-vote message; callers match on it, so it
    /// stays until the wording is changed on purpose.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => "Could not add vote",
            Operation::AddPositive => "Could not add positive vote",
            Operation::AddNegative | Operation::Remove => "Could not add negative vote",
            Operation::Get => "Could not get vote",
            Operation::GetForUserId => "Could not get votes",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by an executor before any response was received.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Errors returned by `InteractionClient` and `InteractionService`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A write or delete returned something other than 200.
    #[error("{}", .operation.failure_message())]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("{operation}: could not decode response (HTTP {status}): {message}")]
    Decode {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("{operation}: transport error: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },
}

impl ApiError {
    /// The operation that failed, when known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Status { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Transport { operation, .. } => Some(*operation),
            ApiError::Serialization(_) => None,
        }
    }

    /// The HTTP status observed, if a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Serialization(_) | ApiError::Transport { .. } => None,
        }
    }
}
