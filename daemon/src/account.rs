//! Account bootstrap: key generation, devnet funding and `.env` output.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use journal_chain::{AccountCredential, AptosClient, AptosConfig, FaucetClient};
use journal_crypto::generate_keypair;
use tracing::info;

/// Settings written to a generated `.env` file.
pub struct EnvFile<'a> {
    pub external_mode: bool,
    pub node_url: &'a str,
    pub credential: &'a AccountCredential,
}

impl EnvFile<'_> {
    pub fn render(&self) -> String {
        format!(
            "JOURNAL_EXTERNAL_MODE={}\nJOURNAL_NODE_URL={}\nJOURNAL_SIGNING_KEY={}\nJOURNAL_OWNER_ADDRESS={}\n",
            self.external_mode,
            self.node_url,
            self.credential.private_key_hex(),
            self.credential.address(),
        )
    }

    /// Write to `path`. Refuses to replace an existing file unless `force`.
    pub fn write(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote environment file");
        Ok(())
    }
}

pub fn new_credential() -> anyhow::Result<AccountCredential> {
    let keypair = generate_keypair().context("failed to generate key pair")?;
    Ok(AccountCredential::from_keypair(keypair))
}

/// Print the account and, if asked, persist it as a `.env` file.
pub fn keygen(
    env_file: Option<&Path>,
    force: bool,
    external: bool,
    node_url: &str,
) -> anyhow::Result<()> {
    let credential = new_credential()?;
    println!("address:     {}", credential.address());
    println!("public key:  {}", credential.public_key().to_hex());
    println!("private key: {}", credential.private_key_hex());

    if let Some(path) = env_file {
        EnvFile {
            external_mode: external,
            node_url,
            credential: &credential,
        }
        .write(path, force)?;
    }
    Ok(())
}

pub struct FundRequest<'a> {
    pub faucet_url: &'a str,
    pub node_url: &'a str,
    pub amount: u64,
    pub timeout: Duration,
    pub env_file: Option<&'a Path>,
    pub force: bool,
}

/// Generate an account, fund it from a devnet faucet and wait for the
/// funding transactions to commit.
pub async fn fund(request: FundRequest<'_>) -> anyhow::Result<()> {
    if let Some(path) = request.env_file {
        if path.exists() && !request.force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }
    }

    let credential = new_credential()?;
    let address = credential.address();
    println!("address: {address}");

    let node = AptosClient::new(
        AptosConfig {
            node_url: request.node_url.to_string(),
            ..AptosConfig::default()
        },
        None,
    )?;
    let faucet = FaucetClient::new(request.faucet_url)?;
    let handles = faucet
        .fund_and_wait(&node, &address, request.amount, request.timeout)
        .await
        .context("faucet funding failed")?;
    println!(
        "funded {} octas in {} transaction(s)",
        request.amount,
        handles.len()
    );

    let resources = node
        .account_resources(&address)
        .await
        .context("failed to list account resources")?;
    println!("account has {} resource(s)", resources.len());

    if let Some(path) = request.env_file {
        EnvFile {
            external_mode: true,
            node_url: request.node_url,
            credential: &credential,
        }
        .write(path, true)?;
    }
    Ok(())
}
