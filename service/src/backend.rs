//! The two ways the service can persist ideas.

use std::sync::Arc;

use journal_chain::{EntryFunctionId, LedgerClient, LedgerError, RawResource, TxHandle};
use journal_store::IdeaStore;
use journal_types::{AccountAddress, Idea, IdeaId, Timestamp, LOCAL_AUTHOR};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{IdSequence, ServiceError};

/// Default name of the on-chain module holding the journal.
pub const DEFAULT_MODULE_NAME: &str = "OpenJournal";

/// Mode selected once at startup.
pub enum IdeaBackend {
    Local(LocalBackend),
    Ledger(LedgerBackend),
}

/// Ideas live only in the persistence store.
pub struct LocalBackend {
    store: Arc<dyn IdeaStore>,
    ids: IdSequence,
}

impl LocalBackend {
    pub fn new(store: Arc<dyn IdeaStore>) -> Result<Self, ServiceError> {
        let ids = IdSequence::resume(store.as_ref())?;
        Ok(Self { store, ids })
    }

    pub(crate) fn submit(&self, title: String, description: String) -> Result<Idea, ServiceError> {
        let idea = Idea::new(
            self.ids.next(),
            title,
            description,
            LOCAL_AUTHOR,
            Timestamp::now(),
        );
        self.store.create(&idea)?;
        info!(id = %idea.id, "idea created");
        Ok(idea)
    }

    pub(crate) fn vote(&self, id: IdeaId) -> Result<Idea, ServiceError> {
        let idea = self.store.increment_vote(id)?;
        debug!(%id, votes = idea.votes, "vote recorded");
        Ok(idea)
    }

    pub(crate) fn get(&self, id: IdeaId) -> Result<Idea, ServiceError> {
        Ok(self.store.get_by_id(id)?)
    }

    pub(crate) fn list(&self) -> Result<Vec<Idea>, ServiceError> {
        Ok(self.store.list()?)
    }
}

/// Where the journal lives on the ledger.
///
/// Missing values are not an error until a request needs them.
#[derive(Clone, Debug)]
pub struct LedgerSettings {
    pub contract_address: Option<AccountAddress>,
    pub module_name: String,
    /// Account holding the `Journal` resource. Falls back to the signer.
    pub owner_address: Option<AccountAddress>,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            contract_address: None,
            module_name: DEFAULT_MODULE_NAME.to_string(),
            owner_address: None,
        }
    }
}

/// Writes go to the external ledger; a summary of each submitted idea is
/// mirrored into the store.
///
/// Mirrored ids come from the local sequence and are not reconciled with
/// any identifier the ledger assigns.
pub struct LedgerBackend {
    store: Arc<dyn IdeaStore>,
    ids: IdSequence,
    ledger: Arc<dyn LedgerClient>,
    settings: LedgerSettings,
}

impl LedgerBackend {
    pub fn new(
        store: Arc<dyn IdeaStore>,
        ledger: Arc<dyn LedgerClient>,
        settings: LedgerSettings,
    ) -> Result<Self, ServiceError> {
        let ids = IdSequence::resume(store.as_ref())?;
        Ok(Self {
            store,
            ids,
            ledger,
            settings,
        })
    }

    fn contract(&self) -> Result<AccountAddress, ServiceError> {
        self.settings
            .contract_address
            .ok_or_else(|| ServiceError::Config("contract address is not configured".into()))
    }

    fn signer(&self) -> Result<AccountAddress, ServiceError> {
        self.ledger
            .signer_address()
            .ok_or_else(|| ServiceError::Config("signing key is not configured".into()))
    }

    fn entry(&self, contract: AccountAddress, function: &str) -> EntryFunctionId {
        EntryFunctionId::new(contract, self.settings.module_name.clone(), function)
    }

    async fn submit_entry(
        &self,
        action: &'static str,
        function: EntryFunctionId,
        args: Vec<Value>,
    ) -> Result<TxHandle, ServiceError> {
        self.ledger
            .submit_entry(&function, args)
            .await
            .map_err(|source| ServiceError::Adapter { action, source })
    }

    pub(crate) async fn submit(
        &self,
        title: String,
        description: String,
        author_hint: Option<String>,
    ) -> Result<TxHandle, ServiceError> {
        let contract = self.contract()?;
        let signer = self.signer()?;
        let owner = match author_hint {
            Some(hint) => hint
                .parse::<AccountAddress>()
                .map_err(|e| ServiceError::Validation(format!("invalid authorHint: {e}")))?,
            None => self.settings.owner_address.unwrap_or(signer),
        };

        let args = vec![
            Value::String(owner.to_string()),
            Value::String(title.clone()),
            Value::String(description.clone()),
        ];
        let handle = self
            .submit_entry("ledger submit", self.entry(contract, "submit_idea"), args)
            .await?;

        let mirror = Idea::new(
            self.ids.next(),
            title,
            description,
            signer.to_string(),
            Timestamp::now(),
        );
        match self.store.create(&mirror) {
            Ok(()) => info!(id = %mirror.id, tx = %handle.hash, "idea submitted to ledger"),
            Err(e) => warn!(tx = %handle.hash, error = %e, "failed to mirror submitted idea"),
        }
        Ok(handle)
    }

    pub(crate) async fn vote(&self, id: IdeaId) -> Result<TxHandle, ServiceError> {
        let contract = self.contract()?;
        let signer = self.signer()?;
        let owner = self.settings.owner_address.unwrap_or(signer);

        let args = vec![
            Value::String(owner.to_string()),
            Value::String(id.to_string()),
        ];
        let handle = self
            .submit_entry("ledger vote", self.entry(contract, "vote_for_idea"), args)
            .await?;
        info!(%id, tx = %handle.hash, "vote submitted to ledger");
        Ok(handle)
    }

    pub(crate) async fn read_journal(&self, id: IdeaId) -> Result<RawResource, ServiceError> {
        let contract = self.contract()?;
        let owner = self
            .settings
            .owner_address
            .or_else(|| self.ledger.signer_address())
            .ok_or_else(|| {
                ServiceError::Config(
                    "journal owner is not configured and no signing key is loaded".into(),
                )
            })?;
        let resource_type = format!("{contract}::{}::Journal", self.settings.module_name);
        debug!(%id, %owner, %resource_type, "reading journal resource");

        match self.ledger.read_resource(&owner, &resource_type).await {
            Ok(resource) => Ok(resource),
            Err(LedgerError::ResourceNotFound(_)) => Err(ServiceError::NotFound(format!(
                "journal resource {resource_type} under {owner}"
            ))),
            Err(source) => Err(ServiceError::Adapter {
                action: "ledger read",
                source,
            }),
        }
    }
}
