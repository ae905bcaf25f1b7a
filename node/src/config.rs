//! Service configuration with TOML file support.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use journal_chain::{AccountCredential, AptosConfig};
use journal_service::LedgerSettings;
use journal_types::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for an Open Journal node.
///
/// Can be loaded from a TOML file via [`JournalConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The daemon layers CLI flags and
/// `JOURNAL_*` environment variables on top.
///
/// Ledger settings are kept as raw strings so that an absent value only
/// fails the requests that need it, while a malformed value fails startup.
#[derive(Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Submit writes to the external ledger instead of the local store only.
    #[serde(default)]
    pub external_mode: bool,

    /// Fullnode REST endpoint.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Hex Ed25519 private key of the submitting account. Never serialized.
    #[serde(default, skip_serializing)]
    pub signing_key: Option<String>,

    /// Address the journal module is published under.
    #[serde(default)]
    pub contract_address: Option<String>,

    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Account holding the `Journal` resource; defaults to the signer.
    #[serde(default)]
    pub owner_address: Option<String>,

    /// HTTP API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Upper bound on waiting for a ledger transaction to commit.
    #[serde(default = "default_ledger_timeout_secs")]
    pub ledger_timeout_secs: u64,

    #[serde(default = "default_max_gas_amount")]
    pub max_gas_amount: u64,

    #[serde(default = "default_gas_unit_price")]
    pub gas_unit_price: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_url() -> String {
    AptosConfig::default().node_url
}

fn default_module_name() -> String {
    journal_service::DEFAULT_MODULE_NAME.to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data.db")
}

fn default_ledger_timeout_secs() -> u64 {
    30
}

fn default_max_gas_amount() -> u64 {
    AptosConfig::default().max_gas_amount
}

fn default_gas_unit_price() -> u64 {
    AptosConfig::default().gas_unit_price
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Blank strings from the environment count as unset.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_address(field: &str, value: &Option<String>) -> Result<Option<AccountAddress>, NodeError> {
    non_empty(value)
        .map(|v| {
            v.parse()
                .map_err(|e| NodeError::Config(format!("{field}: {e}")))
        })
        .transpose()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl JournalConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string. The signing key is
    /// omitted.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    /// Parsed signing credential, if a key is configured.
    pub fn credential(&self) -> Result<Option<AccountCredential>, NodeError> {
        non_empty(&self.signing_key)
            .map(|key| {
                AccountCredential::from_hex(key)
                    .map_err(|e| NodeError::Config(format!("signing_key: {e}")))
            })
            .transpose()
    }

    pub fn ledger_settings(&self) -> Result<LedgerSettings, NodeError> {
        let module_name = self.module_name.trim();
        if module_name.is_empty() {
            return Err(NodeError::Config("module_name must not be empty".into()));
        }
        Ok(LedgerSettings {
            contract_address: parse_address("contract_address", &self.contract_address)?,
            module_name: module_name.to_string(),
            owner_address: parse_address("owner_address", &self.owner_address)?,
        })
    }

    pub fn aptos_config(&self) -> AptosConfig {
        AptosConfig {
            node_url: self.node_url.clone(),
            confirmation_timeout: Duration::from_secs(self.ledger_timeout_secs),
            max_gas_amount: self.max_gas_amount,
            gas_unit_price: self.gas_unit_price,
            ..AptosConfig::default()
        }
    }

    /// Check every value that can be malformed, without opening anything.
    pub fn validate(&self) -> Result<(), NodeError> {
        self.log_format()?;
        self.ledger_settings()?;
        self.credential()?;
        if self.ledger_timeout_secs == 0 {
            return Err(NodeError::Config(
                "ledger_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            external_mode: false,
            node_url: default_node_url(),
            signing_key: None,
            contract_address: None,
            module_name: default_module_name(),
            owner_address: None,
            port: default_port(),
            db_path: default_db_path(),
            ledger_timeout_secs: default_ledger_timeout_secs(),
            max_gas_amount: default_max_gas_amount(),
            gas_unit_price: default_gas_unit_price(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl fmt::Debug for JournalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalConfig")
            .field("external_mode", &self.external_mode)
            .field("node_url", &self.node_url)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("contract_address", &self.contract_address)
            .field("module_name", &self.module_name)
            .field("owner_address", &self.owner_address)
            .field("port", &self.port)
            .field("db_path", &self.db_path)
            .field("ledger_timeout_secs", &self.ledger_timeout_secs)
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}
