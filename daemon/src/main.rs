//! Open Journal daemon — entry point for running the service and
//! bootstrapping ledger accounts.

mod account;

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::Parser;
use journal_node::{init_logging, JournalConfig, JournalNode, LogFormat};

#[derive(Parser)]
#[command(name = "journal-daemon", about = "Open Journal service daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "JOURNAL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP API.
    Run(RunArgs),

    /// Generate a new ledger account key.
    Keygen {
        /// Write the account to this `.env` file.
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Enable external mode in the written `.env` file.
        #[arg(long)]
        external: bool,

        /// Overwrite an existing `.env` file.
        #[arg(long)]
        force: bool,

        #[arg(long, env = "JOURNAL_NODE_URL", default_value = "https://fullnode.devnet.aptoslabs.com")]
        node_url: String,
    },

    /// Generate an account and fund it from a devnet faucet.
    Fund {
        #[arg(long, env = "JOURNAL_FAUCET_URL", default_value = "https://faucet.devnet.aptoslabs.com")]
        faucet_url: String,

        /// Amount to request, in octas.
        #[arg(long, default_value_t = 100_000_000)]
        amount: u64,

        /// Write the funded account to this `.env` file.
        #[arg(long)]
        env_file: Option<PathBuf>,

        #[arg(long)]
        force: bool,

        #[arg(long, env = "JOURNAL_NODE_URL", default_value = "https://fullnode.devnet.aptoslabs.com")]
        node_url: String,

        /// Seconds to wait for the funding transactions to commit.
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Submit writes to the external ledger.
    #[arg(long, env = "JOURNAL_EXTERNAL_MODE", value_parser = BoolishValueParser::new())]
    external_mode: Option<bool>,

    /// Fullnode REST endpoint.
    #[arg(long, env = "JOURNAL_NODE_URL")]
    node_url: Option<String>,

    /// Hex Ed25519 private key of the submitting account.
    #[arg(long, env = "JOURNAL_SIGNING_KEY", hide_env_values = true)]
    signing_key: Option<String>,

    /// Address the journal module is published under.
    #[arg(long, env = "JOURNAL_CONTRACT_ADDRESS")]
    contract_address: Option<String>,

    #[arg(long, env = "JOURNAL_MODULE_NAME")]
    module_name: Option<String>,

    /// Account holding the journal resource (defaults to the signer).
    #[arg(long, env = "JOURNAL_OWNER_ADDRESS")]
    owner_address: Option<String>,

    /// HTTP API port.
    #[arg(long, env = "JOURNAL_PORT")]
    port: Option<u16>,

    /// SQLite database file.
    #[arg(long, env = "JOURNAL_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Seconds to wait for a ledger transaction to commit.
    #[arg(long, env = "JOURNAL_LEDGER_TIMEOUT_SECS")]
    ledger_timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "JOURNAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "JOURNAL_LOG_FORMAT")]
    log_format: Option<String>,
}

impl RunArgs {
    /// Layer the flags that were given over `base`.
    fn apply(self, base: JournalConfig) -> JournalConfig {
        JournalConfig {
            external_mode: self.external_mode.unwrap_or(base.external_mode),
            node_url: self.node_url.unwrap_or(base.node_url),
            signing_key: self.signing_key.or(base.signing_key),
            contract_address: self.contract_address.or(base.contract_address),
            module_name: self.module_name.unwrap_or(base.module_name),
            owner_address: self.owner_address.or(base.owner_address),
            port: self.port.unwrap_or(base.port),
            db_path: self.db_path.unwrap_or(base.db_path),
            ledger_timeout_secs: self.ledger_timeout_secs.unwrap_or(base.ledger_timeout_secs),
            log_level: self.log_level.unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
            ..base
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let base = match cli.config {
        Some(ref path) => JournalConfig::from_toml_file(path)?,
        None => JournalConfig::default(),
    };

    match cli.command {
        Command::Run(args) => {
            let config = args.apply(base);
            init_logging(config.log_format()?, &config.log_level)?;
            tracing::info!(
                port = config.port,
                db = %config.db_path.display(),
                external_mode = config.external_mode,
                "starting Open Journal"
            );

            let node = JournalNode::new(config)?;
            node.run().await?;
            tracing::info!("Open Journal stopped");
        }
        Command::Keygen {
            env_file,
            external,
            force,
            node_url,
        } => {
            init_logging(LogFormat::Human, &base.log_level)?;
            account::keygen(env_file.as_deref(), force, external, &node_url)?;
        }
        Command::Fund {
            faucet_url,
            amount,
            env_file,
            force,
            node_url,
            timeout_secs,
        } => {
            init_logging(LogFormat::Human, &base.log_level)?;
            account::fund(account::FundRequest {
                faucet_url: &faucet_url,
                node_url: &node_url,
                amount,
                timeout: Duration::from_secs(timeout_secs),
                env_file: env_file.as_deref(),
                force,
            })
            .await?;
        }
    }

    Ok(())
}
