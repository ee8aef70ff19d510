use std::ops::Deref;

use close_season::CloseSeason;
use collect_fee::CollectFee;
use enum_dispatch::enum_dispatch;
use eyre::OptionExt;
use finalize_season::FinalizeSeason;
use ghsol_sdk::{
    amount::from_lamports,
    solana_sdk::signature::Signature,
    solana_utils::{utils::explorer_tx_url, RpcLedger},
    Client,
};
use init_config::InitConfig;
use init_season::InitSeason;
use season_status::SeasonStatus;
use transfer_admin::TransferAdmin;

use crate::config::Config;

mod close_season;
mod collect_fee;
mod finalize_season;
mod init_config;
mod init_season;
mod season_status;
mod transfer_admin;

/// Commands.
#[enum_dispatch(Command)]
#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Select the winners of an ended season and assign their prizes.
    CloseSeason(CloseSeason),
    /// Initialize the program config with the wallet as admin.
    InitConfig(InitConfig),
    /// Register and initialize a new season.
    #[command(alias = "init-season-2")]
    InitSeason(InitSeason),
    /// Hand the config admin over to another wallet.
    TransferAdmin(TransferAdmin),
    /// Collect the platform fee of a season.
    CollectFee(CollectFee),
    /// Show the on-chain state of a season.
    SeasonStatus(SeasonStatus),
    /// Close a season once every winner has claimed.
    FinalizeSeason(FinalizeSeason),
}

#[enum_dispatch]
pub(crate) trait Command {
    fn is_client_required(&self) -> bool {
        false
    }

    async fn execute(&self, ctx: Context<'_>) -> eyre::Result<()>;
}

pub(crate) struct Context<'a> {
    config: &'a Config,
    client: Option<&'a CommandClient>,
    _verbose: bool,
}

impl<'a> Context<'a> {
    pub(super) fn new(config: &'a Config, client: Option<&'a CommandClient>, verbose: bool) -> Self {
        Self {
            config,
            client,
            _verbose: verbose,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    pub(crate) fn client(&self) -> eyre::Result<&CommandClient> {
        self.client.ok_or_eyre("client is not provided")
    }

    /// Explorer link of a transaction.
    pub(crate) fn explorer_link(&self, signature: &Signature) -> eyre::Result<String> {
        let explorer = self.config.explorer_url()?;
        Ok(explorer_tx_url(&explorer, signature)?.to_string())
    }
}

/// Client used by commands.
pub(crate) struct CommandClient {
    client: Client<RpcLedger>,
}

impl CommandClient {
    pub(crate) fn new(config: &Config) -> eyre::Result<Self> {
        Self::with_keypair(config, config.keypair()?)
    }

    pub(crate) fn with_keypair(
        config: &Config,
        keypair: ghsol_sdk::solana_sdk::signature::Keypair,
    ) -> eyre::Result<Self> {
        let client = Client::new(config.ledger()?, keypair).with_program(config.program());
        tracing::debug!(payer = %client.payer(), rpc = %client.ledger().url(), "client created");
        Ok(Self { client })
    }
}

impl Deref for CommandClient {
    type Target = Client<RpcLedger>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

/// Format lamports as whole coins.
pub(crate) fn coins(lamports: u64) -> String {
    format!("{} GOR", from_lamports(lamports))
}

/// Shorten an address for display.
pub(crate) fn short(address: &impl ToString) -> String {
    let address = address.to_string();
    match address.get(..8) {
        Some(prefix) if address.len() > 8 => format!("{prefix}..."),
        _ => address,
    }
}

#[cfg(test)]
mod tests {
    use ghsol_sdk::solana_sdk::pubkey::Pubkey;

    use super::*;

    #[test]
    fn format_coins() {
        assert_eq!(coins(1_500_000_000), "1.5 GOR");
        assert_eq!(coins(0), "0 GOR");
    }

    #[test]
    fn shorten_address() {
        let address = Pubkey::new_unique();
        let shortened = short(&address);
        assert_eq!(shortened.len(), 11);
        assert!(address.to_string().starts_with(&shortened[..8]));
        assert_eq!(short(&"abc"), "abc");
    }
}
