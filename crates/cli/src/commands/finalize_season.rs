use ghsol_sdk::season::finalize::{check_readiness, close_season};

use super::coins;

/// Close a season once every winner has claimed.
#[derive(Debug, clap::Args)]
pub struct FinalizeSeason {
    /// Season number.
    #[arg(long)]
    season: u64,
    /// Only check whether the season can be closed.
    #[arg(long)]
    dry_run: bool,
}

impl super::Command for FinalizeSeason {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let readiness = check_readiness(client, self.season).await?;
        println!("Season: {}", readiness.season.name);
        println!("Vault Balance: {}", coins(readiness.vault_balance));
        if !readiness.season.winners_set {
            println!("✗ Winners are not set yet, run `ghsol close-season` first.");
        }
        for prize in &readiness.unclaimed {
            let amount = prize
                .prize_amount
                .map(coins)
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "✗ Placement {} ({}) has not claimed {amount}",
                prize.placement, prize.winner
            );
        }

        if !readiness.is_ready() {
            eyre::bail!("season {} cannot be closed yet", self.season);
        }
        if self.dry_run {
            println!("✓ Season {} is ready to be closed", self.season);
            return Ok(());
        }

        let signature = close_season(client, self.season).await?;
        println!("✓ Season {} closed", self.season);
        println!("   Explorer: {}", ctx.explorer_link(&signature)?);
        Ok(())
    }
}
