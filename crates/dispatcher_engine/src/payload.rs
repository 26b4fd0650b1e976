//! Request body of a batch POST.
//!
//! The receiving webhook reads these exact keys; they are part of the wire
//! contract and must not follow Rust naming.

use serde::{Deserialize, Serialize};

use crate::{DispatchError, FailureKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireContact {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Telefone")]
    pub phone: String,
    #[serde(rename = "Nome_Campanha")]
    pub campaign: String,
    #[serde(rename = "Nome_template")]
    pub template: String,
}

/// Serializes a batch as one JSON array.
pub fn encode_batch(contacts: &[WireContact]) -> Result<Vec<u8>, DispatchError> {
    serde_json::to_vec(contacts).map_err(|err| DispatchError::new(FailureKind::Encode, err.to_string()))
}
