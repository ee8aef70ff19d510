use std::{fmt, time::Duration};

use ghsol_solana_utils::Ledger;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    builders::SeasonProgram,
    constants::PRIZE_SUBMISSION_INTERVAL,
    leaderboard::{rank_eligible, ParticipantRecord, RankedParticipant, WinnerAssignment},
    program_error::SeasonProgramError,
    Client,
};

use super::SubmitOutcome;

/// Winners of a season and the addresses involved in paying them out.
#[derive(Debug, Clone)]
pub struct CloseSeasonPlan {
    season_number: u64,
    season: Pubkey,
    vault: Pubkey,
    eligible: Vec<RankedParticipant>,
    winners: Vec<WinnerAssignment>,
}

/// A submission the close-season flow would perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    /// Record the winners.
    SetWinners {
        /// Winners in placement order.
        winners: Vec<Pubkey>,
    },
    /// Assign the prize of one placement.
    SetWinnerPrize {
        /// 1-based placement.
        placement: u8,
        /// Winner wallet.
        winner: Pubkey,
    },
    /// Close the season. Never submitted by this flow.
    CloseSeason,
}

impl PlannedStep {
    /// Step label, e.g. `2.1`.
    pub fn label(&self) -> String {
        match self {
            Self::SetWinners { .. } => "1".to_string(),
            Self::SetWinnerPrize { placement, .. } => format!("2.{placement}"),
            Self::CloseSeason => "3".to_string(),
        }
    }
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetWinners { winners } => write!(
                f,
                "setWinners - Set {} winner pubkey(s) on season account",
                winners.len()
            ),
            Self::SetWinnerPrize { placement, winner } => {
                write!(f, "setWinnerPrize - Set placement {placement} for {winner}")
            }
            Self::CloseSeason => {
                write!(f, "closeSeason - Close season account and return remaining funds")
            }
        }
    }
}

impl CloseSeasonPlan {
    /// Select the winners of a season from its leaderboard.
    pub fn new(
        program: &SeasonProgram,
        season_number: u64,
        leaderboard: &[ParticipantRecord],
    ) -> crate::Result<Self> {
        let eligible = rank_eligible(leaderboard)?;
        let winners = crate::leaderboard::select_winners(leaderboard)?;
        let season = program.find_season_address(season_number);
        let vault = program.find_vault_address(&season);
        Ok(Self {
            season_number,
            season,
            vault,
            eligible,
            winners,
        })
    }

    /// Season number.
    pub fn season_number(&self) -> u64 {
        self.season_number
    }

    /// Season address.
    pub fn season(&self) -> &Pubkey {
        &self.season
    }

    /// Vault address.
    pub fn vault(&self) -> &Pubkey {
        &self.vault
    }

    /// Eligible participants, best first.
    pub fn eligible(&self) -> &[RankedParticipant] {
        &self.eligible
    }

    /// Selected winners.
    pub fn winners(&self) -> &[WinnerAssignment] {
        &self.winners
    }

    /// Returns whether any participant is eligible.
    pub fn has_winners(&self) -> bool {
        !self.winners.is_empty()
    }

    /// Winner wallets in placement order.
    pub fn winner_keys(&self) -> Vec<Pubkey> {
        self.winners.iter().map(|w| w.record.wallet).collect()
    }

    /// Submissions this plan consists of.
    ///
    /// Empty if there is no winner.
    pub fn steps(&self, include_close: bool) -> Vec<PlannedStep> {
        if !self.has_winners() {
            return Vec::new();
        }
        let mut steps = vec![PlannedStep::SetWinners {
            winners: self.winner_keys(),
        }];
        steps.extend(self.winners.iter().map(|w| PlannedStep::SetWinnerPrize {
            placement: w.placement,
            winner: w.record.wallet,
        }));
        if include_close {
            steps.push(PlannedStep::CloseSeason);
        }
        steps
    }

    /// Record the winners and assign their prizes.
    ///
    /// `WinnersAlreadySet` is treated as already satisfied, any other
    /// failure to record the winners aborts. A failed prize assignment is
    /// reported and the remaining placements are still processed. The
    /// season itself is never closed.
    ///
    /// With [`CloseSeasonOptions::dry_run`] nothing is submitted and the
    /// report only lists the planned steps.
    pub async fn execute<L: Ledger>(
        &self,
        client: &Client<L>,
        options: &CloseSeasonOptions,
        mut on_event: impl FnMut(CloseSeasonEvent<'_>),
    ) -> crate::Result<CloseSeasonReport> {
        if !self.has_winners() {
            tracing::info!(season = self.season_number, "no eligible winners");
            return Ok(CloseSeasonReport::default());
        }
        let planned = self.steps(!options.skip_close);
        if options.dry_run {
            tracing::info!(season = self.season_number, steps = planned.len(), "dry run");
            return Ok(CloseSeasonReport {
                planned,
                ..Default::default()
            });
        }

        on_event(CloseSeasonEvent::SettingWinners {
            winners: &self.winners,
        });
        let ix = client.program().set_winners(
            &client.payer(),
            self.season_number,
            &self.winner_keys(),
        )?;
        let winners_outcome = match client.send(ix).await {
            Ok(signature) => SubmitOutcome::Submitted(signature),
            Err(err) if SeasonProgramError::WinnersAlreadySet.matches(&err) => {
                tracing::info!(season = self.season_number, "winners already set");
                SubmitOutcome::AlreadySatisfied
            }
            Err(err) => return Err(err),
        };
        on_event(CloseSeasonEvent::WinnersSet(winners_outcome));

        let mut prizes = Vec::with_capacity(self.winners.len());
        for (idx, winner) in self.winners.iter().enumerate() {
            if idx != 0 && !options.prize_interval.is_zero() {
                tokio::time::sleep(options.prize_interval).await;
            }
            on_event(CloseSeasonEvent::SettingPrize { winner });
            let result = self.set_winner_prize(client, winner).await;
            match &result {
                Ok(signature) => on_event(CloseSeasonEvent::PrizeSet { winner, signature }),
                Err(error) => {
                    tracing::warn!(placement = winner.placement, %error, "failed to set prize");
                    on_event(CloseSeasonEvent::PrizeFailed { winner, error });
                }
            }
            prizes.push(PrizeOutcome {
                placement: winner.placement,
                winner: winner.record.wallet,
                result,
            });
        }

        Ok(CloseSeasonReport {
            planned,
            winners: Some(winners_outcome),
            prizes,
        })
    }

    async fn set_winner_prize<L: Ledger>(
        &self,
        client: &Client<L>,
        winner: &WinnerAssignment,
    ) -> crate::Result<Signature> {
        let ix = client.program().set_winner_prize(
            &client.payer(),
            self.season_number,
            &winner.record.wallet,
            winner.placement,
        )?;
        client.send(ix).await
    }
}

/// Options of [`CloseSeasonPlan::execute`].
#[derive(Debug, Clone)]
pub struct CloseSeasonOptions {
    /// Pause between consecutive prize submissions.
    pub prize_interval: Duration,
    /// Only plan, submit nothing.
    pub dry_run: bool,
    /// Leave the close step out of the plan.
    pub skip_close: bool,
}

impl Default for CloseSeasonOptions {
    fn default() -> Self {
        Self {
            prize_interval: PRIZE_SUBMISSION_INTERVAL,
            dry_run: false,
            skip_close: false,
        }
    }
}

/// Progress of [`CloseSeasonPlan::execute`].
#[derive(Debug)]
pub enum CloseSeasonEvent<'a> {
    /// About to record the winners.
    SettingWinners {
        /// Winners.
        winners: &'a [WinnerAssignment],
    },
    /// Winners recorded.
    WinnersSet(SubmitOutcome),
    /// About to assign a prize.
    SettingPrize {
        /// Winner.
        winner: &'a WinnerAssignment,
    },
    /// Prize assigned.
    PrizeSet {
        /// Winner.
        winner: &'a WinnerAssignment,
        /// Signature.
        signature: &'a Signature,
    },
    /// Prize assignment failed.
    PrizeFailed {
        /// Winner.
        winner: &'a WinnerAssignment,
        /// Error.
        error: &'a crate::Error,
    },
}

/// Result of one prize assignment.
#[derive(Debug)]
pub struct PrizeOutcome {
    /// Placement.
    pub placement: u8,
    /// Winner wallet.
    pub winner: Pubkey,
    /// Signature or failure.
    pub result: crate::Result<Signature>,
}

/// Result of [`CloseSeasonPlan::execute`].
#[derive(Debug, Default)]
pub struct CloseSeasonReport {
    /// Steps of the plan, empty if there was no winner.
    pub planned: Vec<PlannedStep>,
    /// Outcome of recording the winners, `None` if there was no winner.
    pub winners: Option<SubmitOutcome>,
    /// Prize assignments in placement order.
    pub prizes: Vec<PrizeOutcome>,
}

impl CloseSeasonReport {
    /// Placements whose prize assignment failed.
    pub fn failed_placements(&self) -> Vec<u8> {
        self.prizes
            .iter()
            .filter(|prize| prize.result.is_err())
            .map(|prize| prize.placement)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ghsol_solana_utils::SubmissionError;
    use solana_sdk::signature::Keypair;

    use super::*;
    use crate::{
        client::mock::MockLedger,
        instruction::{self, decode_set_winners, Operation},
        leaderboard::tests::record,
    };

    fn options() -> CloseSeasonOptions {
        CloseSeasonOptions {
            prize_interval: Duration::ZERO,
            ..Default::default()
        }
    }

    fn leaderboard() -> Vec<ParticipantRecord> {
        vec![
            record("12.5", 4),
            record("99.0", 0),
            record("-3.2", 2),
            record("40", 10),
            record("500", 0),
        ]
    }

    #[test]
    fn plan_derives_addresses() {
        let program = SeasonProgram::default();
        let plan = CloseSeasonPlan::new(&program, 3, &leaderboard()).unwrap();
        assert_eq!(plan.season(), &program.find_season_address(3));
        assert_eq!(plan.vault(), &program.find_vault_address(plan.season()));
        assert_eq!(plan.eligible().len(), 3);
        assert_eq!(plan.winners().len(), 3);
    }

    #[test]
    fn dry_run_steps() {
        let records = leaderboard();
        let plan = CloseSeasonPlan::new(&SeasonProgram::default(), 3, &records).unwrap();
        let steps = plan.steps(true);
        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[0],
            PlannedStep::SetWinners {
                winners: vec![records[3].wallet, records[0].wallet, records[2].wallet]
            }
        );
        assert_eq!(
            steps.iter().map(PlannedStep::label).collect::<Vec<_>>(),
            ["1", "2.1", "2.2", "2.3", "3"]
        );
        assert_eq!(steps[4], PlannedStep::CloseSeason);
        assert_eq!(plan.steps(false).len(), 4);
    }

    #[tokio::test]
    async fn no_winners_no_submissions() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let records = vec![record("10", 0), record("20", 0)];
        let plan = CloseSeasonPlan::new(client.program(), 3, &records).unwrap();
        assert!(plan.steps(true).is_empty());

        let mut events = 0;
        let report = plan
            .execute(&client, &options(), |_| events += 1)
            .await
            .unwrap();
        assert!(report.winners.is_none());
        assert!(report.prizes.is_empty());
        assert_eq!(events, 0);
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn dry_run_submits_nothing() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let plan = CloseSeasonPlan::new(client.program(), 3, &leaderboard()).unwrap();

        let mut events = 0;
        let options = CloseSeasonOptions {
            dry_run: true,
            ..options()
        };
        let report = plan
            .execute(&client, &options, |_| events += 1)
            .await
            .unwrap();
        assert_eq!(report.planned, plan.steps(true));
        assert!(report.winners.is_none());
        assert!(report.prizes.is_empty());
        assert_eq!(events, 0);
        assert!(ledger.sent().is_empty());

        let options = CloseSeasonOptions {
            skip_close: true,
            ..options
        };
        let report = plan.execute(&client, &options, |_| {}).await.unwrap();
        assert_eq!(report.planned, plan.steps(false));
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn sets_winners_then_prizes() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let records = leaderboard();
        let plan = CloseSeasonPlan::new(client.program(), 3, &records).unwrap();

        let report = plan.execute(&client, &options(), |_| {}).await.unwrap();
        assert!(matches!(report.winners, Some(SubmitOutcome::Submitted(_))));
        assert!(report.failed_placements().is_empty());

        let sent = ledger.sent();
        assert_eq!(sent.len(), 4);
        assert_eq!(decode_set_winners(&sent[0].data).unwrap(), plan.winner_keys());
        for (placement, ix) in (1u8..).zip(&sent[1..]) {
            assert_eq!(ix.data, instruction::set_winner_prize(placement).unwrap());
        }
        assert!(sent
            .iter()
            .all(|ix| ix.data[..8] != Operation::CloseSeason.discriminator()));
    }

    #[tokio::test]
    async fn winners_already_set_is_tolerated() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let plan = CloseSeasonPlan::new(client.program(), 3, &leaderboard()).unwrap();
        ledger.reject(
            instruction::set_winners(&plan.winner_keys()).unwrap(),
            SubmissionError::new("Transaction simulation failed").with_code(6004),
        );

        let report = plan.execute(&client, &options(), |_| {}).await.unwrap();
        assert_eq!(report.winners, Some(SubmitOutcome::AlreadySatisfied));
        assert_eq!(report.prizes.len(), 3);
        assert_eq!(ledger.sent().len(), 4);
    }

    #[tokio::test]
    async fn other_set_winners_failures_abort() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let plan = CloseSeasonPlan::new(client.program(), 3, &leaderboard()).unwrap();
        ledger.reject(
            instruction::set_winners(&plan.winner_keys()).unwrap(),
            SubmissionError::new("Transaction simulation failed")
                .with_code(6003)
                .with_logs(["Program log: AnchorError occurred. Error Code: SeasonNotEnded."]),
        );

        let err = plan
            .execute(&client, &options(), |_| {})
            .await
            .unwrap_err();
        assert!(SeasonProgramError::SeasonNotEnded.matches(&err));
        assert!(err
            .to_string()
            .contains("Program log: AnchorError occurred. Error Code: SeasonNotEnded."));
        assert_eq!(ledger.sent().len(), 1);
    }

    #[tokio::test]
    async fn prize_failure_does_not_stop_the_rest() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let plan = CloseSeasonPlan::new(client.program(), 3, &leaderboard()).unwrap();
        ledger.reject(
            instruction::set_winner_prize(2).unwrap(),
            SubmissionError::new("participant not found"),
        );

        let mut failed = Vec::new();
        let report = plan
            .execute(&client, &options(), |event| {
                if let CloseSeasonEvent::PrizeFailed { winner, .. } = event {
                    failed.push(winner.placement);
                }
            })
            .await
            .unwrap();
        assert_eq!(failed, [2]);
        assert_eq!(report.failed_placements(), [2]);
        assert_eq!(report.prizes.len(), 3);
        assert_eq!(ledger.sent().len(), 4);
    }
}
