//! Devnet faucet client for funding freshly generated accounts.

use std::time::Duration;

use journal_types::{AccountAddress, TxHash};
use tracing::info;

use crate::{AptosClient, LedgerError, TxHandle};

pub struct FaucetClient {
    http: reqwest::Client,
    faucet_url: String,
}

impl FaucetClient {
    pub fn new(faucet_url: impl Into<String>) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            faucet_url: faucet_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Ask the faucet to mint `amount` octas to `address`. Returns the hashes
    /// of the funding transactions the faucet submitted.
    pub async fn fund_account(
        &self,
        address: &AccountAddress,
        amount: u64,
    ) -> Result<Vec<TxHash>, LedgerError> {
        let url = format!("{}/mint", self.faucet_url);
        let response = self
            .http
            .post(&url)
            .query(&[("amount", amount.to_string()), ("address", address.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let hashes: Vec<String> = response
            .json()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()))?;
        let hashes = hashes
            .iter()
            .map(|h| {
                TxHash::from_hex(h)
                    .map_err(|e| LedgerError::Decode(format!("faucet transaction hash {h}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(%address, amount, transactions = hashes.len(), "faucet funding requested");
        Ok(hashes)
    }

    /// Fund `address` and wait, bounded by `timeout`, until every funding
    /// transaction has committed on `node`.
    pub async fn fund_and_wait(
        &self,
        node: &AptosClient,
        address: &AccountAddress,
        amount: u64,
        timeout: Duration,
    ) -> Result<Vec<TxHandle>, LedgerError> {
        let hashes = self.fund_account(address, amount).await?;
        let wait_all = async {
            let mut handles = Vec::with_capacity(hashes.len());
            for hash in &hashes {
                handles.push(node.wait_for_transaction(hash).await?);
            }
            Ok::<_, LedgerError>(handles)
        };
        tokio::time::timeout(timeout, wait_all)
            .await
            .map_err(|_| LedgerError::Timeout(timeout.as_secs()))?
    }
}
