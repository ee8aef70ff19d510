use ghsol_sdk::season::{config::initialize_config, InitConfigOutcome};

use super::coins;

/// Initialize the program config with the wallet as admin.
#[derive(Debug, clap::Args)]
pub struct InitConfig {}

impl super::Command for InitConfig {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let admin = client.payer();

        println!("Gorbage Hands - Initialize Config (Set Admin)");
        println!();
        println!("Admin Wallet: {admin}");
        println!("RPC: {}", ctx.config().rpc_url());
        let balance = client.balance(&admin).await?;
        println!("Balance: {}", coins(balance));
        println!();

        let config_address = client.program().find_config_address();
        println!("Config PDA: {config_address}");

        match initialize_config(client).await? {
            InitConfigOutcome::Exists { config, is_admin } => {
                println!();
                println!("⚠ Config already initialized!");
                println!("   Current Admin: {}", config.admin);
                println!();
                if is_admin {
                    println!("✓ You are already the admin!");
                } else {
                    println!("✗ You are NOT the admin.");
                }
            }
            InitConfigOutcome::Initialized(signature) => {
                println!("✓ Config initialized successfully!");
                println!("   Signature: {signature}");
                println!("   Explorer: {}", ctx.explorer_link(&signature)?);
                println!();
                println!("You are now the global admin.");
                println!("   Admin: {admin}");
                println!("   Config PDA: {config_address}");
            }
        }
        Ok(())
    }
}
