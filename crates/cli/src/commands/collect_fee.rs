use ghsol_sdk::{season::finalize::collect_fee, solana_sdk::pubkey::Pubkey};

/// Collect the platform fee of a season.
#[derive(Debug, clap::Args)]
pub struct CollectFee {
    /// Season number.
    #[arg(long)]
    season: u64,
    /// Account receiving the fee. Defaults to the wallet.
    #[arg(long)]
    treasury: Option<Pubkey>,
}

impl super::Command for CollectFee {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let treasury = self.treasury.unwrap_or_else(|| client.payer());
        let signature = collect_fee(client, self.season, &treasury).await?;
        println!("✓ Fee of season {} collected into {treasury}", self.season);
        println!("   Explorer: {}", ctx.explorer_link(&signature)?);
        Ok(())
    }
}
