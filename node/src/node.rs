//! The Open Journal node — wires storage, the ledger client, the idea
//! service and the HTTP API together.

use std::sync::Arc;

use journal_chain::{AptosClient, LedgerClient};
use journal_rpc::RpcServer;
use journal_service::IdeaService;
use journal_store::IdeaStore;
use journal_store_sqlite::SqliteDatabase;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::JournalConfig;
use crate::error::NodeError;
use crate::shutdown::ShutdownController;

pub struct JournalNode {
    config: JournalConfig,
    service: Arc<IdeaService>,
    shutdown: Arc<ShutdownController>,
}

impl JournalNode {
    /// Validate `config`, open the database and build the service for the
    /// configured mode.
    pub fn new(config: JournalConfig) -> Result<Self, NodeError> {
        config.validate()?;

        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = SqliteDatabase::open(&config.db_path)?;
        let store: Arc<dyn IdeaStore> = Arc::new(db.idea_store());
        info!(path = %config.db_path.display(), ideas = store.count()?, "database opened");

        let service = if config.external_mode {
            let ledger = Self::ledger_client(&config)?;
            let settings = config.ledger_settings()?;
            if settings.contract_address.is_none() {
                warn!("external mode without contract_address; ledger writes will be refused");
            }
            match ledger.signer_address() {
                Some(signer) => info!(%signer, node_url = %config.node_url, "external ledger mode"),
                None => warn!("external mode without signing_key; ledger writes will be refused"),
            }
            IdeaService::ledger(store, ledger, settings)?
        } else {
            info!("local mode");
            IdeaService::local(store)?
        };

        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Wrap an already built service, e.g. one backed by nullables.
    pub fn with_service(config: JournalConfig, service: Arc<IdeaService>) -> Self {
        Self {
            config,
            service,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    fn ledger_client(config: &JournalConfig) -> Result<Arc<dyn LedgerClient>, NodeError> {
        let credential = config.credential()?;
        let client = AptosClient::new(config.aptos_config(), credential)?;
        Ok(Arc::new(client))
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<IdeaService> {
        &self.service
    }

    /// Serve the HTTP API on the configured port until SIGINT/SIGTERM or
    /// [`stop`](Self::stop).
    pub async fn run(&self) -> Result<(), NodeError> {
        let server = RpcServer::new(self.config.port, Arc::clone(&self.service));
        let rx = self.shutdown.subscribe();
        let signals = self.spawn_signal_listener();
        let result = server.start(rx).await;
        signals.abort();
        Ok(result?)
    }

    /// Like [`run`](Self::run), on an already bound listener.
    pub async fn run_on(&self, listener: TcpListener) -> Result<(), NodeError> {
        let server = RpcServer::new(self.config.port, Arc::clone(&self.service));
        let rx = self.shutdown.subscribe();
        let signals = self.spawn_signal_listener();
        let result = server.serve(listener, rx).await;
        signals.abort();
        Ok(result?)
    }

    /// Trigger a graceful shutdown of a running node.
    pub fn stop(&self) {
        self.shutdown.shutdown();
    }

    fn spawn_signal_listener(&self) -> tokio::task::JoinHandle<()> {
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move { shutdown.wait_for_signal().await })
    }
}
