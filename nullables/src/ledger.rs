//! Nullable ledger — a scripted [`LedgerClient`] that records submissions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use journal_chain::{EntryFunctionId, LedgerClient, LedgerError, RawResource, TxHandle};
use journal_types::{AccountAddress, TxHash};

type FailureFn = Box<dyn Fn() -> LedgerError + Send + Sync>;

/// One recorded `submit_entry` call.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerCall {
    pub function: EntryFunctionId,
    pub args: Vec<serde_json::Value>,
}

/// A deterministic ledger for testing.
///
/// Every successful submission commits immediately with hash
/// `[0, .., n]` and version `n`, where `n` counts submissions from 1.
/// Failed submissions are recorded too.
pub struct NullLedger {
    signer: Option<AccountAddress>,
    calls: Mutex<Vec<LedgerCall>>,
    resources: Mutex<HashMap<(AccountAddress, String), serde_json::Value>>,
    failure: Mutex<Option<FailureFn>>,
}

impl NullLedger {
    pub fn new(signer: Option<AccountAddress>) -> Self {
        Self {
            signer,
            calls: Mutex::new(Vec::new()),
            resources: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    /// A ledger whose signer is `[0xaa; 32]`.
    pub fn with_signer() -> Self {
        Self::new(Some(AccountAddress::new([0xaa; 32])))
    }

    /// Make every subsequent submission fail with the error `make` builds.
    pub fn fail_with(&self, make: impl Fn() -> LedgerError + Send + Sync + 'static) {
        *self.failure.lock().unwrap() = Some(Box::new(make));
    }

    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Store `data` as resource `resource_type` under `account`.
    pub fn put_resource(
        &self,
        account: AccountAddress,
        resource_type: impl Into<String>,
        data: serde_json::Value,
    ) {
        self.resources
            .lock()
            .unwrap()
            .insert((account, resource_type.into()), data);
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The hash the `n`th submission (1-based) commits with.
    pub fn hash_for(n: u64) -> TxHash {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        TxHash::new(bytes)
    }
}

#[async_trait]
impl LedgerClient for NullLedger {
    fn signer_address(&self) -> Option<AccountAddress> {
        self.signer
    }

    async fn submit_entry(
        &self,
        function: &EntryFunctionId,
        args: Vec<serde_json::Value>,
    ) -> Result<TxHandle, LedgerError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(LedgerCall {
                function: function.clone(),
                args,
            });
            calls.len() as u64
        };
        if self.signer.is_none() {
            return Err(LedgerError::MissingCredential);
        }
        if let Some(make) = self.failure.lock().unwrap().as_ref() {
            return Err(make());
        }
        Ok(TxHandle {
            hash: Self::hash_for(n),
            version: Some(n),
        })
    }

    async fn read_resource(
        &self,
        account: &AccountAddress,
        resource_type: &str,
    ) -> Result<RawResource, LedgerError> {
        self.resources
            .lock()
            .unwrap()
            .get(&(*account, resource_type.to_string()))
            .map(|data| RawResource {
                resource_type: resource_type.to_string(),
                data: data.clone(),
            })
            .ok_or_else(|| LedgerError::ResourceNotFound(resource_type.to_string()))
    }
}
