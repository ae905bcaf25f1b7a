//! The adapter contract the idea service depends on.

use std::fmt;

use async_trait::async_trait;
use journal_types::{AccountAddress, TxHash};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Fully qualified name of an on-chain entry function:
/// `<module address>::<module>::<function>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryFunctionId {
    pub module_address: AccountAddress,
    pub module: String,
    pub function: String,
}

impl EntryFunctionId {
    pub fn new(
        module_address: AccountAddress,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            module_address,
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.module_address, self.module, self.function)
    }
}

/// Handle to a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TxHandle {
    pub hash: TxHash,
    /// Ledger version the transaction was committed at, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// A resource exactly as the ledger returned it; `data` is not decoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}

/// Submit and read operations against an external ledger.
///
/// Implementations never retry. A submission returns only after the ledger
/// has committed the transaction, rejected it, or the implementation's
/// confirmation timeout has elapsed.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Account that signs submissions, if a credential is loaded.
    fn signer_address(&self) -> Option<AccountAddress>;

    /// Sign and submit a call to `function` with ordered JSON `args`, then
    /// wait for the ledger to commit it.
    async fn submit_entry(
        &self,
        function: &EntryFunctionId,
        args: Vec<serde_json::Value>,
    ) -> Result<TxHandle, LedgerError>;

    /// Fetch the resource of type `resource_type` stored under `account`.
    /// Fails with [`LedgerError::ResourceNotFound`] if there is none.
    async fn read_resource(
        &self,
        account: &AccountAddress,
        resource_type: &str,
    ) -> Result<RawResource, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_function_display_is_fully_qualified() {
        let f = EntryFunctionId::new("0x1".parse().unwrap(), "OpenJournal", "submit_idea");
        assert_eq!(
            f.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000001::OpenJournal::submit_idea"
        );
    }

    #[test]
    fn raw_resource_keeps_type_field_name() {
        let res: RawResource =
            serde_json::from_str(r#"{"type":"0x1::m::Journal","data":{"ideas":[]}}"#).unwrap();
        assert_eq!(res.resource_type, "0x1::m::Journal");
        let back = serde_json::to_value(&res).unwrap();
        assert_eq!(back["type"], "0x1::m::Journal");
    }
}
