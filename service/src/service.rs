use std::sync::Arc;

use journal_chain::{LedgerClient, RawResource, TxHandle};
use journal_store::IdeaStore;
use journal_types::{Idea, IdeaId};

use crate::{IdeaBackend, LedgerBackend, LedgerSettings, LocalBackend, ServiceError};

/// A request to create an idea.
#[derive(Clone, Debug, Default)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    /// Journal owner to submit under (ledger mode only). Blank is ignored.
    pub author_hint: Option<String>,
}

impl NewIdea {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            author_hint: None,
        }
    }
}

/// Result of a write: the stored idea in local mode, the committed
/// transaction in ledger mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Idea(Idea),
    Tx(TxHandle),
}

pub struct IdeaService {
    backend: IdeaBackend,
}

impl IdeaService {
    pub fn new(backend: IdeaBackend) -> Self {
        Self { backend }
    }

    /// Local mode over `store`, with ids resumed after its maximum.
    pub fn local(store: Arc<dyn IdeaStore>) -> Result<Self, ServiceError> {
        Ok(Self::new(IdeaBackend::Local(LocalBackend::new(store)?)))
    }

    /// Ledger mode, mirroring submitted ideas into `store`.
    pub fn ledger(
        store: Arc<dyn IdeaStore>,
        ledger: Arc<dyn LedgerClient>,
        settings: LedgerSettings,
    ) -> Result<Self, ServiceError> {
        Ok(Self::new(IdeaBackend::Ledger(LedgerBackend::new(
            store, ledger, settings,
        )?)))
    }

    pub fn external_mode(&self) -> bool {
        matches!(self.backend, IdeaBackend::Ledger(_))
    }

    /// Create an idea. Nothing is written when validation or configuration
    /// checks fail.
    pub async fn submit_idea(&self, new: NewIdea) -> Result<Submission, ServiceError> {
        validate(&new)?;
        let NewIdea {
            title,
            description,
            author_hint,
        } = new;
        let author_hint = author_hint.filter(|h| !h.trim().is_empty());

        match &self.backend {
            IdeaBackend::Local(local) => local.submit(title, description).map(Submission::Idea),
            IdeaBackend::Ledger(ledger) => ledger
                .submit(title, description, author_hint)
                .await
                .map(Submission::Tx),
        }
    }

    pub async fn vote_for_idea(&self, id: IdeaId) -> Result<Submission, ServiceError> {
        match &self.backend {
            IdeaBackend::Local(local) => local.vote(id).map(Submission::Idea),
            IdeaBackend::Ledger(ledger) => ledger.vote(id).await.map(Submission::Tx),
        }
    }

    pub fn get_idea(&self, id: IdeaId) -> Result<Idea, ServiceError> {
        match &self.backend {
            IdeaBackend::Local(local) => local.get(id),
            IdeaBackend::Ledger(_) => Err(ServiceError::NotImplemented("reading an idea")),
        }
    }

    /// All ideas by ascending id.
    pub fn list_ideas(&self) -> Result<Vec<Idea>, ServiceError> {
        match &self.backend {
            IdeaBackend::Local(local) => local.list(),
            IdeaBackend::Ledger(_) => Err(ServiceError::NotImplemented("listing ideas")),
        }
    }

    /// The raw on-chain `Journal` resource. The id is not used to select
    /// anything inside the resource.
    pub async fn read_journal(&self, id: IdeaId) -> Result<RawResource, ServiceError> {
        match &self.backend {
            IdeaBackend::Local(_) => Err(ServiceError::Config(
                "ledger reads require external mode (wrong mode)".into(),
            )),
            IdeaBackend::Ledger(ledger) => ledger.read_journal(id).await,
        }
    }
}

fn validate(new: &NewIdea) -> Result<(), ServiceError> {
    if new.title.trim().is_empty() || new.description.trim().is_empty() {
        return Err(ServiceError::Validation(
            "title and description are required".into(),
        ));
    }
    Ok(())
}
