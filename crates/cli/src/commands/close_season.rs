use ghsol_sdk::{
    leaderboard::{RankedParticipant, WinnerAssignment},
    season::{CloseSeasonEvent, CloseSeasonOptions, CloseSeasonPlan, SubmitOutcome},
};
use prettytable::{format::consts::FORMAT_CLEAN, row, Table};

use super::{coins, short};

const USAGE: &str = "Usage: ghsol close-season --season <number> [--dry-run] [--skip-close]";

/// Select the winners of an ended season and assign their prizes.
#[derive(Debug, clap::Args)]
pub struct CloseSeason {
    /// Season number.
    #[arg(long)]
    season: Option<u64>,
    /// Print the planned submissions without sending anything.
    #[arg(long)]
    dry_run: bool,
    /// Do not mention the close step.
    #[arg(long)]
    skip_close: bool,
}

fn gorbagio(id: Option<u64>) -> String {
    id.map(|id| format!("#{id}")).unwrap_or_else(|| "-".to_string())
}

fn eligible_table(eligible: &[RankedParticipant]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(row!["#", "Gorbagio", "Wallet", "ROI", "Trades"]);
    for (idx, participant) in eligible.iter().enumerate() {
        let record = &participant.record;
        table.add_row(row![
            idx + 1,
            gorbagio(record.gorbagio_id),
            short(&record.wallet),
            format!("{}%", record.roi),
            record.trades,
        ]);
    }
    table
}

fn winners_table(winners: &[WinnerAssignment]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(row!["Place", "Gorbagio", "Wallet", "ROI", "Trades", "Prize"]);
    for winner in winners {
        let record = &winner.record;
        table.add_row(row![
            winner.placement,
            gorbagio(record.gorbagio_id),
            short(&record.wallet),
            format!("{}%", record.roi),
            record.trades,
            format!("{}%", winner.share),
        ]);
    }
    table
}

impl super::Command for CloseSeason {
    fn is_client_required(&self) -> bool {
        // Without a season only the usage error is reported.
        self.season.is_some()
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let Some(season_number) = self.season else {
            eyre::bail!("missing `--season`\n{USAGE}");
        };
        let client = ctx.client()?;
        let config = ctx.config();

        println!("========================================");
        println!("  Close Season {season_number} and Pay Winners");
        println!("========================================");
        println!(
            "Mode: {}",
            if self.dry_run {
                "DRY RUN (no transactions)"
            } else {
                "LIVE"
            }
        );
        println!("Admin wallet: {}", client.payer());
        println!("RPC: {}", config.rpc_url());
        println!();

        println!("Fetching season data from API...");
        let data = config.backend()?.season_data(season_number).await?;
        let summary = &data.summary;
        println!("Season: {}", summary.name);
        println!("Status: {}", summary.status);
        println!(
            "Prize Pool: {} GOR ({} lamports)",
            summary.prize_pool_coins, summary.prize_pool
        );
        println!("Participants: {}", data.leaderboard.len());
        println!();

        let plan = CloseSeasonPlan::new(client.program(), season_number, &data.leaderboard)?;
        if !plan.has_winners() {
            println!("No eligible winners (no participants with trades).");
            println!("Skipping winner assignment.");
            return Ok(());
        }

        println!("=== ELIGIBLE PARTICIPANTS ===");
        eligible_table(plan.eligible()).printstd();
        println!();
        println!("=== WINNERS (Top {} with trades) ===", plan.winners().len());
        winners_table(plan.winners()).printstd();
        println!();

        println!("=== PDAs ===");
        println!("Season PDA: {}", plan.season());
        println!("Vault PDA: {}", plan.vault());
        let vault_balance = client.balance(plan.vault()).await?;
        println!(
            "Vault Balance: {vault_balance} lamports ({})",
            coins(vault_balance)
        );
        println!();

        let options = CloseSeasonOptions {
            prize_interval: config.prize_interval()?,
            dry_run: self.dry_run,
            skip_close: self.skip_close,
        };
        let report = plan
            .execute(client, &options, |event| match event {
                CloseSeasonEvent::SettingWinners { winners } => {
                    println!("=== STEP 1: Setting Winners ===");
                    println!("Setting {} winner(s)...", winners.len());
                }
                CloseSeasonEvent::WinnersSet(SubmitOutcome::Submitted(signature)) => {
                    println!("✓ Winners set! Signature: {signature}");
                    println!();
                    println!("=== STEP 2: Setting Prize Amounts ===");
                }
                CloseSeasonEvent::WinnersSet(SubmitOutcome::AlreadySatisfied) => {
                    println!("✓ Winners already set (skipping)");
                    println!();
                    println!("=== STEP 2: Setting Prize Amounts ===");
                }
                CloseSeasonEvent::SettingPrize { winner } => {
                    println!(
                        "Setting prize for placement {} ({})...",
                        winner.placement,
                        short(&winner.record.wallet)
                    );
                }
                CloseSeasonEvent::PrizeSet { winner, signature } => {
                    println!(
                        "✓ Prize set for placement {}! Signature: {signature}",
                        winner.placement
                    );
                }
                CloseSeasonEvent::PrizeFailed { winner, error } => {
                    eprintln!(
                        "✗ Failed to set prize for placement {}: {error}",
                        winner.placement
                    );
                }
            })
            .await?;

        if self.dry_run {
            println!("=== DRY RUN - No transactions will be sent ===");
            println!();
            println!("Would execute:");
            for step in &report.planned {
                println!("{}. {step}", step.label());
            }
            println!();
            println!("Re-run without --dry-run to execute.");
            return Ok(());
        }

        println!();
        println!("=== SUMMARY ===");
        println!("Winners can now claim their prizes with the claim_prize instruction.");
        println!();
        println!("Prize distribution (50/30/20):");
        for winner in plan.winners() {
            let amount = winner.prize_amount(vault_balance);
            println!(
                "  {}. {} - {amount} lamports ({})",
                winner.placement,
                short(&winner.record.wallet),
                coins(amount)
            );
        }
        let failed = report.failed_placements();
        if !failed.is_empty() {
            println!();
            println!(
                "⚠ Prize assignment failed for placement(s) {:?}; re-run to retry.",
                failed
            );
        }

        if !self.skip_close {
            println!();
            println!("=== STEP 3: Close Season ===");
            println!("NOTE: Only close the season after all winners have claimed their prizes!");
            println!(
                "Skipping auto-close for safety. Run `ghsol finalize-season --season {season_number}` when ready."
            );
        }

        println!();
        println!("========================================");
        println!("  Season closure complete!");
        println!("========================================");
        Ok(())
    }
}
