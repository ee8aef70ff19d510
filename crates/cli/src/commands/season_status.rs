use ghsol_sdk::solana_sdk::signature::Keypair;
use prettytable::{format::consts::FORMAT_CLEAN, row, Table};
use time::OffsetDateTime;

use super::{coins, CommandClient};

/// Show the on-chain state of a season.
#[derive(Debug, clap::Args)]
pub struct SeasonStatus {
    /// Season number.
    #[arg(long)]
    season: u64,
}

impl super::Command for SeasonStatus {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        // Read-only, so any keypair will do.
        let client = CommandClient::with_keypair(ctx.config(), Keypair::new())?;
        let program = client.program();
        let season_address = program.find_season_address(self.season);
        let Some(season) = client.season(self.season).await? else {
            println!("Season {} is not initialized ({season_address})", self.season);
            return Ok(());
        };
        let vault_balance = client.vault_balance(self.season).await?;
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.add_row(row!["Season", format!("{} ({})", season.name, season.season_number)]);
        table.add_row(row!["Address", season_address]);
        table.add_row(row!["Vault", program.find_vault_address(&season_address)]);
        table.add_row(row!["Authority", season.authority]);
        table.add_row(row!["Entry fee", coins(season.entry_fee)]);
        table.add_row(row!["Prize pool", coins(season.prize_pool)]);
        table.add_row(row!["Vault balance", coins(vault_balance)]);
        table.add_row(row!["Participants", season.participant_count]);
        table.add_row(row!["Registration open", season.is_registration_open(now)]);
        table.add_row(row!["Ended", season.has_ended(now)]);
        table.add_row(row!["Active", season.is_active]);
        table.add_row(row!["Winners set", season.winners_set]);
        table.add_row(row![
            "Fee collected",
            if season.fee_collected {
                coins(season.fee_amount)
            } else {
                "no".to_string()
            }
        ]);
        table.printstd();

        if season.winners().is_empty() {
            return Ok(());
        }
        println!();
        let mut winners = Table::new();
        winners.set_format(*FORMAT_CLEAN);
        winners.set_titles(row!["Place", "Wallet", "Prize", "Claimed"]);
        for (winner, placement) in season.winners().iter().zip(1u8..) {
            match client.participant(self.season, winner).await? {
                Some(participant) => winners.add_row(row![
                    placement,
                    winner,
                    coins(participant.prize_amount),
                    participant.prize_claimed,
                ]),
                None => winners.add_row(row![placement, winner, "-", "-"]),
            };
        }
        winners.printstd();
        Ok(())
    }
}
