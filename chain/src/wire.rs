//! JSON shapes exchanged with the fullnode REST API.
//!
//! 64-bit integers travel as decimal strings on this API.

use serde::{Deserialize, Deserializer, Serialize};

/// `entry_function_payload` of a user transaction.
#[derive(Clone, Debug, Serialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl EntryFunctionPayload {
    pub fn new(function: String, arguments: Vec<serde_json::Value>) -> Self {
        Self {
            payload_type: "entry_function_payload",
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// A user transaction request. Sent unsigned to `encode_submission`, then
/// with `signature` set to `/transactions`.
#[derive(Clone, Debug, Serialize)]
pub struct SubmitRequest {
    pub sender: String,
    pub sequence_number: String,
    pub max_gas_amount: String,
    pub gas_unit_price: String,
    pub expiration_timestamp_secs: String,
    pub payload: EntryFunctionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<TransactionSignature>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TransactionSignature {
    #[serde(rename = "type")]
    pub signature_type: &'static str,
    pub public_key: String,
    pub signature: String,
}

impl TransactionSignature {
    pub fn ed25519(public_key: String, signature: String) -> Self {
        Self {
            signature_type: "ed25519_signature",
            public_key,
            signature,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccountData {
    #[serde(deserialize_with = "u64_from_str")]
    pub sequence_number: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

/// `GET /transactions/by_hash/{hash}` result. Only the fields the adapter
/// inspects are decoded.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionView {
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "opt_u64_from_str")]
    pub version: Option<u64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub vm_status: Option<String>,
}

impl TransactionView {
    pub fn is_pending(&self) -> bool {
        self.transaction_type == "pending_transaction"
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

fn u64_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

fn opt_u64_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|v| v.parse().map_err(serde::de::Error::custom))
        .transpose()
}
