use std::{path::PathBuf, str::FromStr, time::Duration};

use eyre::WrapErr;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use ghsol_sdk::{
    api::{BackendClient, DEFAULT_BACKEND_URL},
    constants::PRIZE_SUBMISSION_INTERVAL,
    solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Keypair},
    solana_utils::{signer::load_keypair, RpcLedger},
    SeasonProgram,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use url::Url;

/// Default RPC endpoint.
pub(crate) const DEFAULT_RPC_URL: &str = "https://rpc.trashscan.io";

/// Default block explorer.
pub(crate) const DEFAULT_EXPLORER_URL: &str = "https://explorer.trashscan.io/";

/// Default wallet path.
pub(crate) const DEFAULT_WALLET: &str = "~/.config/solana/id.json";

const CONFIG_FILE: &str = "ghsol/config.toml";

/// Legacy variable naming the wallet path.
const WALLET_PATH_ENV: &str = "WALLET_PATH";

/// Configuration.
///
/// Every field can be set in the config file and overridden on the
/// command line.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub(crate) struct Config {
    /// Path to the admin wallet keypair.
    #[arg(long, short, env = "ADMIN_WALLET_PATH", global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wallet: Option<String>,
    /// RPC endpoint.
    #[arg(long, short = 'u', env = "RPC_URL", global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    /// Backend API base URL.
    #[arg(long, env = "BACKEND_API_URL", global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backend_url: Option<String>,
    /// Oracle wallet registered with new seasons.
    #[arg(long, env = "ORACLE_WALLET_ADDRESS", global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oracle: Option<String>,
    /// Season program ID.
    #[arg(long, global = true)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    program: Option<Pubkey>,
    /// Commitment level.
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    commitment: Option<String>,
    /// Block explorer base URL.
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explorer_url: Option<String>,
    /// Pause between prize submissions, e.g. `500ms`.
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prize_interval: Option<String>,
}

impl Config {
    /// Default config file path.
    pub(crate) fn default_path() -> eyre::Result<PathBuf> {
        use etcetera::BaseStrategy;

        let strategy = etcetera::choose_base_strategy()?;
        Ok(strategy.config_dir().join(CONFIG_FILE))
    }

    /// Layer the config file, the legacy wallet variable and `overrides`.
    pub(crate) fn load(path: Option<&PathBuf>, overrides: &Config) -> eyre::Result<Self> {
        let path = match path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };
        tracing::debug!(path = %path.display(), "loading config");
        let config = Figment::new()
            .merge(Toml::file(&path))
            .merge(
                Env::raw()
                    .only(&[WALLET_PATH_ENV])
                    .map(|_| "wallet".into()),
            )
            .merge(Serialized::defaults(overrides))
            .extract()
            .wrap_err_with(|| format!("failed to load config from `{}`", path.display()))?;
        Ok(config)
    }

    /// Wallet path.
    pub(crate) fn wallet(&self) -> &str {
        self.wallet.as_deref().unwrap_or(DEFAULT_WALLET)
    }

    /// Load the wallet keypair.
    pub(crate) fn keypair(&self) -> eyre::Result<Keypair> {
        load_keypair(self.wallet()).wrap_err_with(|| {
            format!(
                "could not load the admin keypair from `{}`, make sure the file exists and contains a valid keypair",
                self.wallet()
            )
        })
    }

    /// RPC endpoint.
    pub(crate) fn rpc_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_RPC_URL)
    }

    /// Commitment.
    pub(crate) fn commitment(&self) -> eyre::Result<CommitmentConfig> {
        match self.commitment.as_deref() {
            Some(commitment) => CommitmentConfig::from_str(commitment)
                .map_err(|err| eyre::eyre!("invalid commitment `{commitment}`: {err}")),
            None => Ok(CommitmentConfig::confirmed()),
        }
    }

    /// Create a ledger connection.
    pub(crate) fn ledger(&self) -> eyre::Result<RpcLedger> {
        Ok(RpcLedger::new(self.rpc_url(), self.commitment()?)?)
    }

    /// Backend client.
    pub(crate) fn backend(&self) -> eyre::Result<BackendClient> {
        let url = self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL);
        Ok(BackendClient::try_new(url)?)
    }

    /// Season program.
    pub(crate) fn program(&self) -> SeasonProgram {
        match self.program {
            Some(id) => SeasonProgram::builder().id(id).build(),
            None => SeasonProgram::default(),
        }
    }

    /// Explorer base URL.
    pub(crate) fn explorer_url(&self) -> eyre::Result<Url> {
        let url = self.explorer_url.as_deref().unwrap_or(DEFAULT_EXPLORER_URL);
        let mut url = Url::parse(url).wrap_err("invalid explorer url")?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Pause between prize submissions.
    pub(crate) fn prize_interval(&self) -> eyre::Result<Duration> {
        self.prize_interval
            .as_deref()
            .map(|interval| {
                humantime::parse_duration(interval)
                    .wrap_err_with(|| format!("invalid prize interval `{interval}`"))
            })
            .transpose()
            .map(|interval| interval.unwrap_or(PRIZE_SUBMISSION_INTERVAL))
    }

    /// Oracle wallet, `None` if not configured.
    pub(crate) fn oracle(&self) -> eyre::Result<Option<Pubkey>> {
        self.oracle
            .as_deref()
            .map(|oracle| {
                Pubkey::from_str(oracle)
                    .map_err(|err| eyre::eyre!("`{oracle}` is not a valid address: {err}"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.wallet(), DEFAULT_WALLET);
        assert_eq!(config.rpc_url(), DEFAULT_RPC_URL);
        assert_eq!(config.commitment().unwrap(), CommitmentConfig::confirmed());
        assert_eq!(config.prize_interval().unwrap(), PRIZE_SUBMISSION_INTERVAL);
        assert_eq!(
            config.explorer_url().unwrap().as_str(),
            DEFAULT_EXPLORER_URL
        );
        assert_eq!(config.program().id, ghsol_sdk::constants::PROGRAM_ID);
        assert!(config.oracle().unwrap().is_none());
    }

    #[test]
    fn file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
url = "http://localhost:8899"
wallet = "/tmp/from-file.json"
prize_interval = "2s"
commitment = "finalized"
"#
        )
        .unwrap();

        let overrides = Config {
            wallet: Some("/tmp/from-cli.json".to_string()),
            ..Default::default()
        };
        let config = Config::load(Some(&file.path().to_path_buf()), &overrides).unwrap();
        assert_eq!(config.rpc_url(), "http://localhost:8899");
        assert_eq!(config.wallet(), "/tmp/from-cli.json");
        assert_eq!(config.prize_interval().unwrap(), Duration::from_secs(2));
        assert_eq!(config.commitment().unwrap(), CommitmentConfig::finalized());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(Some(&path), &Config::default()).unwrap();
        assert_eq!(config.rpc_url(), DEFAULT_RPC_URL);
    }

    #[test]
    fn invalid_values() {
        let config = Config {
            prize_interval: Some("soon".to_string()),
            commitment: Some("eventually".to_string()),
            oracle: Some("not-an-address".to_string()),
            ..Default::default()
        };
        assert!(config.prize_interval().is_err());
        assert!(config.commitment().is_err());
        assert!(config.oracle().is_err());
    }

    #[test]
    fn explorer_url_gets_trailing_slash() {
        let config = Config {
            explorer_url: Some("https://explorer.example.com/base".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.explorer_url().unwrap().as_str(),
            "https://explorer.example.com/base/"
        );
    }
}
