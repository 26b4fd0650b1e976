use crate::OutboundContact;

pub type BatchId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read a delimited file and report back with `Msg::ImportLoaded` or `Msg::ImportFailed`.
    ReadImportFile { path: String },
    /// POST one batch and report back with `Msg::BatchFinished`.
    PostBatch {
        batch_id: BatchId,
        endpoint: String,
        contacts: Vec<OutboundContact>,
    },
}

/// How the single request of a send cycle ended. Applies to every record of
/// the batch alike; the wire format has no per-record result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Delivered,
    Rejected { status: u16, status_text: String },
    Failed(TransportFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request never produced a response (unreachable host, refused
    /// connection, TLS or cross-origin rejection).
    Network,
    Other(String),
}

impl BatchOutcome {
    /// Message stored on each record of a failed batch.
    pub fn error_message(&self) -> Option<String> {
        match self {
            BatchOutcome::Delivered => None,
            BatchOutcome::Rejected {
                status,
                status_text,
            } => Some(
                format!("Global Error: {status} {status_text}")
                    .trim_end()
                    .to_string(),
            ),
            BatchOutcome::Failed(TransportFailure::Network) => {
                Some("Network/CORS Error".to_string())
            }
            BatchOutcome::Failed(TransportFailure::Other(message)) => Some(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_carries_status() {
        let outcome = BatchOutcome::Rejected {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("Global Error: 500 Internal Server Error")
        );
    }

    #[test]
    fn rejection_without_reason_has_no_trailing_space() {
        let outcome = BatchOutcome::Rejected {
            status: 599,
            status_text: String::new(),
        };
        assert_eq!(outcome.error_message().as_deref(), Some("Global Error: 599"));
    }

    #[test]
    fn transport_failures_are_distinguished() {
        assert_eq!(
            BatchOutcome::Failed(TransportFailure::Network)
                .error_message()
                .as_deref(),
            Some("Network/CORS Error")
        );
        assert_eq!(
            BatchOutcome::Failed(TransportFailure::Other("relative URL without a base".into()))
                .error_message()
                .as_deref(),
            Some("relative URL without a base")
        );
        assert_eq!(BatchOutcome::Delivered.error_message(), None);
    }
}
