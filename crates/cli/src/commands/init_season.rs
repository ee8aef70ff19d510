use std::time::Duration;

use eyre::WrapErr;
use ghsol_sdk::{
    api::CreateSeasonOutcome,
    season::{init::initialize_season, InitSeasonOutcome, InitializeSeasonParams, SeasonSchedule},
    solana_sdk::signature::Keypair,
};
use rust_decimal::Decimal;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::CommandClient;

/// Register a season with the backend and initialize it on-chain.
#[derive(Debug, clap::Args)]
pub struct InitSeason {
    /// Season number.
    #[arg(long, default_value_t = 2)]
    season: u64,
    /// Display name.
    #[arg(long, default_value = "Season 2")]
    name: String,
    /// Entry fee in whole coins.
    #[arg(long, default_value = "1000")]
    entry_fee: Decimal,
    /// Delay before registration opens.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "5m")]
    opens_in: Duration,
    /// Length of the registration window.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1d")]
    registration: Duration,
    /// Length of the season after registration closes.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "7d")]
    duration: Duration,
    /// Print the plan without creating anything.
    #[arg(long)]
    dry_run: bool,
}

fn rfc3339(time: OffsetDateTime) -> eyre::Result<String> {
    Ok(time.format(&Rfc3339)?)
}

impl super::Command for InitSeason {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let config = ctx.config();
        println!("Gorbage Hands - Season {} Initialization", self.season);
        println!();
        if self.dry_run {
            println!("⚠ DRY RUN MODE - No transactions will be sent");
            println!();
        }

        let schedule = SeasonSchedule::from_now(
            OffsetDateTime::now_utc(),
            self.opens_in,
            self.registration,
            self.duration,
        )?;
        let params = InitializeSeasonParams {
            season_number: self.season,
            name: self.name.clone(),
            entry_fee: self.entry_fee,
            schedule,
        };
        params.validate()?;

        println!("Season Timeline:");
        println!(
            "   Registration Start: {}",
            rfc3339(schedule.registration_start_time()?)?
        );
        println!(
            "   Registration End:   {}",
            rfc3339(schedule.registration_end_time()?)?
        );
        println!(
            "   Season End:         {}",
            rfc3339(schedule.season_end_time()?)?
        );
        println!();
        println!("Season Parameters:");
        println!("   Entry Fee: {} GOR", self.entry_fee);
        println!(
            "   Registration: {}",
            humantime::format_duration(self.registration)
        );
        println!(
            "   Season Duration: {}",
            humantime::format_duration(self.duration)
        );
        println!();

        let program = config.program();
        let season_address = program.find_season_address(self.season);
        let vault_address = program.find_vault_address(&season_address);
        println!("PDAs:");
        println!("   Config PDA: {}", program.find_config_address());
        println!("   Season PDA: {season_address}");
        println!("   Vault PDA:  {vault_address}");
        println!();

        let keypair = match config.keypair() {
            Ok(keypair) => keypair,
            Err(err) if self.dry_run => {
                tracing::warn!(%err, "failed to load the admin wallet");
                println!("⚠ Using placeholder wallet for dry run");
                Keypair::new()
            }
            Err(err) => return Err(err),
        };
        let client = CommandClient::with_keypair(config, keypair)?;
        let authority = client.payer();
        let oracle = config.oracle()?.unwrap_or(authority);
        println!("Admin Wallet: {authority}");
        println!("Oracle Wallet: {oracle}");
        println!();

        println!("Step 1: Creating season in database...");
        if self.dry_run {
            println!("   [DRY RUN] Would create season in database");
        } else {
            let request = params.create_request(&authority, &oracle.to_string());
            let outcome = config
                .backend()?
                .create_season(&request)
                .await
                .wrap_err("failed to create season in database")?;
            match outcome {
                CreateSeasonOutcome::Created { season_address } => {
                    println!("   ✓ Season created in database");
                    if let Some(address) = season_address {
                        println!("   Season PDA: {address}");
                    }
                }
                CreateSeasonOutcome::AlreadyExists => {
                    println!("   ⚠ Season already exists in database");
                }
            }
        }

        println!();
        println!("Step 2: Initializing season on-chain...");
        if self.dry_run {
            if client.account_exists(&season_address).await? {
                println!("   ⚠ Season PDA already exists on-chain");
                println!("   Skipping on-chain initialization");
                return Ok(());
            }
            println!("   [DRY RUN] Would send initialize_season transaction");
            println!("   Program ID: {}", program.id);
            println!("   Authority: {authority}");
            println!("   Entry Fee: {} GOR", self.entry_fee);
        } else {
            match initialize_season(&client, &params)
                .await
                .wrap_err("failed to initialize season on-chain")?
            {
                InitSeasonOutcome::AlreadyInitialized => {
                    println!("   ⚠ Season PDA already exists on-chain");
                    println!("   Skipping on-chain initialization");
                    return Ok(());
                }
                InitSeasonOutcome::Initialized(signature) => {
                    println!("   ✓ Season initialized on-chain!");
                    println!("   Signature: {signature}");
                    println!("   Explorer: {}", ctx.explorer_link(&signature)?);
                }
            }
        }

        println!();
        println!("✓ {} initialization complete!", self.name);
        println!();
        println!("Summary:");
        println!("   Season: {}", self.name);
        println!("   Entry Fee: {} GOR", self.entry_fee);
        println!("   Season PDA: {season_address}");
        println!("   Vault PDA: {vault_address}");
        Ok(())
    }
}
