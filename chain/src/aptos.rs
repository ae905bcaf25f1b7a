//! Ledger client for an Aptos fullnode's REST API.

use std::time::Duration;

use async_trait::async_trait;
use journal_types::{AccountAddress, Timestamp, TxHash};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::wire::{
    AccountData, EntryFunctionPayload, ErrorBody, PendingTransaction, SubmitRequest,
    TransactionSignature, TransactionView,
};
use crate::{AccountCredential, EntryFunctionId, LedgerClient, LedgerError, RawResource, TxHandle};

/// Tunables for [`AptosClient`].
#[derive(Clone, Debug)]
pub struct AptosConfig {
    /// Fullnode base URL; `/v1` is appended when missing.
    pub node_url: String,
    /// Upper bound on a whole submission, from sequence lookup to commit.
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Lifetime of a submitted transaction before the ledger discards it.
    pub expiration_secs: u64,
}

impl Default for AptosConfig {
    fn default() -> Self {
        Self {
            node_url: "https://fullnode.devnet.aptoslabs.com".to_string(),
            confirmation_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
            max_gas_amount: 200_000,
            gas_unit_price: 100,
            expiration_secs: 600,
        }
    }
}

/// Append `/v1` to a fullnode URL unless it already ends with it.
pub fn normalize_node_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

/// HTTP client for one fullnode, optionally holding the signing credential.
pub struct AptosClient {
    http: reqwest::Client,
    base_url: String,
    config: AptosConfig,
    credential: Option<AccountCredential>,
}

impl AptosClient {
    pub fn new(
        config: AptosConfig,
        credential: Option<AccountCredential>,
    ) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to create HTTP client: {e}")))?;
        let base_url = normalize_node_url(&config.node_url);
        Ok(Self {
            http,
            base_url,
            config,
            credential,
        })
    }

    /// Current sequence number of `account`.
    pub async fn sequence_number(&self, account: &AccountAddress) -> Result<u64, LedgerError> {
        let url = format!("{}/accounts/{}", self.base_url, account);
        let data: AccountData = self.get_json(&url).await?;
        Ok(data.sequence_number)
    }

    /// Every resource stored under `account`, undecoded.
    pub async fn account_resources(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<RawResource>, LedgerError> {
        let url = format!("{}/accounts/{}/resources", self.base_url, account);
        self.get_json(&url).await
    }

    /// Poll until the transaction leaves the mempool. Not bounded by itself;
    /// callers wrap it in a timeout.
    pub async fn wait_for_transaction(&self, hash: &TxHash) -> Result<TxHandle, LedgerError> {
        let url = format!("{}/transactions/by_hash/{}", self.base_url, hash);
        loop {
            let response = self.http.get(&url).send().await?;
            if response.status() == StatusCode::NOT_FOUND {
                debug!(%hash, "transaction not yet visible");
                tokio::time::sleep(self.config.poll_interval).await;
                continue;
            }
            let view: TransactionView = decode(response).await?;
            if view.is_pending() {
                tokio::time::sleep(self.config.poll_interval).await;
                continue;
            }
            if view.success == Some(false) {
                return Err(LedgerError::Rejected {
                    hash: hash.to_string(),
                    vm_status: view.vm_status.unwrap_or_else(|| "unknown".to_string()),
                });
            }
            return Ok(TxHandle {
                hash: *hash,
                version: view.version,
            });
        }
    }

    async fn submit_and_wait(
        &self,
        credential: &AccountCredential,
        function: &EntryFunctionId,
        args: Vec<serde_json::Value>,
    ) -> Result<TxHandle, LedgerError> {
        let sender = credential.address();
        let sequence_number = self.sequence_number(&sender).await?;
        let expiration = Timestamp::now().plus_secs(self.config.expiration_secs);

        let mut request = SubmitRequest {
            sender: sender.to_string(),
            sequence_number: sequence_number.to_string(),
            max_gas_amount: self.config.max_gas_amount.to_string(),
            gas_unit_price: self.config.gas_unit_price.to_string(),
            expiration_timestamp_secs: expiration.as_secs().to_string(),
            payload: EntryFunctionPayload::new(function.to_string(), args),
            signature: None,
        };

        let encode_url = format!("{}/transactions/encode_submission", self.base_url);
        let signing_message_hex: String = self.post_json(&encode_url, &request).await?;
        let signing_message = hex::decode(signing_message_hex.trim_start_matches("0x"))
            .map_err(|e| LedgerError::Signing(format!("signing message is not hex: {e}")))?;

        let signature = credential.sign(&signing_message);
        request.signature = Some(TransactionSignature::ed25519(
            credential.public_key().to_hex(),
            signature.to_hex(),
        ));

        let submit_url = format!("{}/transactions", self.base_url);
        let pending: PendingTransaction = self.post_json(&submit_url, &request).await?;
        let hash = TxHash::from_hex(&pending.hash)
            .map_err(|e| LedgerError::Decode(format!("transaction hash {}: {e}", pending.hash)))?;
        info!(%hash, %function, sequence_number, "transaction submitted");

        let handle = self.wait_for_transaction(&hash).await?;
        info!(%hash, version = ?handle.version, "transaction committed");
        Ok(handle)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LedgerError> {
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, LedgerError> {
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }
}

/// Decode a 2xx body as `T`; map anything else to [`LedgerError::Http`]
/// carrying the node's error message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LedgerError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        return Err(LedgerError::Http {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json()
        .await
        .map_err(|e| LedgerError::Decode(e.to_string()))
}

#[async_trait]
impl LedgerClient for AptosClient {
    fn signer_address(&self) -> Option<AccountAddress> {
        self.credential.as_ref().map(AccountCredential::address)
    }

    async fn submit_entry(
        &self,
        function: &EntryFunctionId,
        args: Vec<serde_json::Value>,
    ) -> Result<TxHandle, LedgerError> {
        let credential = self.credential.as_ref().ok_or(LedgerError::MissingCredential)?;
        let limit = self.config.confirmation_timeout;
        match tokio::time::timeout(limit, self.submit_and_wait(credential, function, args)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%function, timeout_secs = limit.as_secs(), "gave up waiting for confirmation");
                Err(LedgerError::Timeout(limit.as_secs()))
            }
        }
    }

    async fn read_resource(
        &self,
        account: &AccountAddress,
        resource_type: &str,
    ) -> Result<RawResource, LedgerError> {
        let resources = match self.account_resources(account).await {
            Ok(resources) => resources,
            Err(LedgerError::Http { status: 404, .. }) => {
                return Err(LedgerError::ResourceNotFound(format!(
                    "{resource_type} (account {account} does not exist)"
                )))
            }
            Err(e) => return Err(e),
        };
        resources
            .into_iter()
            .find(|r| r.resource_type == resource_type)
            .ok_or_else(|| LedgerError::ResourceNotFound(resource_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_url_gets_version_suffix() {
        assert_eq!(
            normalize_node_url("https://fullnode.devnet.aptoslabs.com"),
            "https://fullnode.devnet.aptoslabs.com/v1"
        );
        assert_eq!(
            normalize_node_url("https://fullnode.devnet.aptoslabs.com/v1/"),
            "https://fullnode.devnet.aptoslabs.com/v1"
        );
    }

    #[test]
    fn client_without_credential_has_no_signer() {
        let client = AptosClient::new(AptosConfig::default(), None).unwrap();
        assert_eq!(client.signer_address(), None);
    }

    #[tokio::test]
    async fn submit_without_credential_fails_fast() {
        let client = AptosClient::new(AptosConfig::default(), None).unwrap();
        let f = EntryFunctionId::new(AccountAddress::new([1; 32]), "OpenJournal", "submit_idea");
        let err = client.submit_entry(&f, vec![]).await.unwrap_err();
        assert!(matches!(err, LedgerError::MissingCredential));
    }
}
