use ghsol_sdk::{season::config::transfer_admin, solana_sdk::pubkey::Pubkey};

/// Hand the config admin over to another wallet.
#[derive(Debug, clap::Args)]
pub struct TransferAdmin {
    /// The new admin.
    new_admin: Pubkey,
}

impl super::Command for TransferAdmin {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let signature = transfer_admin(client, &self.new_admin).await?;
        tracing::info!(new_admin = %self.new_admin, %signature, "admin transferred");
        println!("✓ Admin transferred to {}", self.new_admin);
        println!("   Explorer: {}", ctx.explorer_link(&signature)?);
        Ok(())
    }
}
