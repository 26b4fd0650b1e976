use std::time::Duration;

use dispatch_logging::{dispatch_debug, dispatch_info, dispatch_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::payload::{encode_batch, WireContact};
use crate::{BatchId, DeliveryReceipt, DispatchError, FailureKind};

/// Transport settings. Both timeouts are off unless configured, leaving the
/// transport's own behaviour in place.
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

#[async_trait::async_trait]
pub trait BatchPoster: Send + Sync {
    async fn post(
        &self,
        batch_id: BatchId,
        endpoint: &str,
        contacts: &[WireContact],
    ) -> Result<DeliveryReceipt, DispatchError>;
}

/// Sends the batch as a single JSON POST. The client keeps no cookie store,
/// so no credentials travel with the request. One client is shared by every
/// batch so connections are pooled.
#[derive(Debug, Clone)]
pub struct ReqwestPoster {
    client: reqwest::Client,
}

impl ReqwestPoster {
    pub fn new(settings: &DispatchSettings) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Unavailable, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl BatchPoster for ReqwestPoster {
    async fn post(
        &self,
        batch_id: BatchId,
        endpoint: &str,
        contacts: &[WireContact],
    ) -> Result<DeliveryReceipt, DispatchError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|err| DispatchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = encode_batch(contacts)?;

        dispatch_debug!(
            "batch {} POST {} ({} contacts, {} bytes)",
            batch_id,
            url,
            contacts.len(),
            body.len()
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = read_json_body(batch_id, response).await;

        if !status.is_success() {
            return Err(DispatchError::new(
                FailureKind::HttpStatus {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                },
                status.to_string(),
            ));
        }

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

/// Best effort: the body never changes how the batch is classified.
async fn read_json_body(batch_id: BatchId, response: reqwest::Response) -> Option<serde_json::Value> {
    let status = response.status();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            dispatch_warn!("batch {} response body could not be read: {}", batch_id, err);
            return None;
        }
    };
    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => {
            dispatch_info!("batch {} server response ({}): {}", batch_id, status, value);
            Some(value)
        }
        Err(err) => {
            dispatch_warn!(
                "batch {} server answered {} without valid JSON: {}",
                batch_id,
                status,
                err
            );
            None
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return DispatchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}
