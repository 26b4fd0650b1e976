use std::fmt;

pub type BatchId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BatchCompleted {
        batch_id: BatchId,
        result: Result<DeliveryReceipt, DispatchError>,
    },
}

/// A 2xx answer. The body is informational only.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Non-2xx answer; `reason` is the canonical phrase, empty when unknown.
    HttpStatus { status: u16, reason: String },
    Timeout,
    Encode,
    /// No response at all: refused, unreachable, DNS or TLS failure.
    Network,
    /// The engine thread could not run the request.
    Unavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus { status, reason } => write!(f, "http status {status} {reason}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Encode => write!(f, "payload encoding failed"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Unavailable => write!(f, "engine unavailable"),
        }
    }
}
