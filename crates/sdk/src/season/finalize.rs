use ghsol_solana_utils::Ledger;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{state::Season, Client};

/// A placed winner who has not claimed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclaimedPrize {
    /// 1-based placement.
    pub placement: u8,
    /// Winner wallet.
    pub winner: Pubkey,
    /// Assigned prize in lamports, `None` if the participant account is missing.
    pub prize_amount: Option<u64>,
}

/// Whether a season can be closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReadiness {
    /// Decoded season.
    pub season: Season,
    /// Vault balance in lamports.
    pub vault_balance: u64,
    /// Winners still to claim.
    pub unclaimed: Vec<UnclaimedPrize>,
}

impl FinalizeReadiness {
    /// Returns whether closing the season is allowed.
    pub fn is_ready(&self) -> bool {
        self.season.winners_set && self.unclaimed.is_empty()
    }
}

/// Inspect a season and the claim state of its winners.
pub async fn check_readiness<L: Ledger>(
    client: &Client<L>,
    season_number: u64,
) -> crate::Result<FinalizeReadiness> {
    let season = client.season(season_number).await?.ok_or_else(|| {
        crate::Error::PreconditionFailed(format!("season {season_number} is not initialized"))
    })?;
    let vault_balance = client.vault_balance(season_number).await?;
    let mut unclaimed = Vec::new();
    for (winner, placement) in season.winners().iter().zip(1u8..) {
        let participant = client.participant(season_number, winner).await?;
        match participant {
            Some(participant) if participant.prize_claimed => {}
            Some(participant) => unclaimed.push(UnclaimedPrize {
                placement,
                winner: *winner,
                prize_amount: Some(participant.prize_amount),
            }),
            None => unclaimed.push(UnclaimedPrize {
                placement,
                winner: *winner,
                prize_amount: None,
            }),
        }
    }
    Ok(FinalizeReadiness {
        season,
        vault_balance,
        unclaimed,
    })
}

/// Close a season and reclaim the residual vault funds.
///
/// Refuses unless the winners are set and every winner has claimed.
pub async fn close_season<L: Ledger>(
    client: &Client<L>,
    season_number: u64,
) -> crate::Result<Signature> {
    let readiness = check_readiness(client, season_number).await?;
    if !readiness.season.winners_set {
        return Err(crate::Error::PreconditionFailed(format!(
            "winners of season {season_number} are not set"
        )));
    }
    if !readiness.unclaimed.is_empty() {
        let placements = readiness
            .unclaimed
            .iter()
            .map(|prize| prize.placement.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(crate::Error::PreconditionFailed(format!(
            "prizes of placement(s) {placements} are not claimed yet"
        )));
    }
    let ix = client.program().close_season(&client.payer(), season_number)?;
    client.send(ix).await
}

/// Collect the platform fee of a season into `treasury`.
pub async fn collect_fee<L: Ledger>(
    client: &Client<L>,
    season_number: u64,
    treasury: &Pubkey,
) -> crate::Result<Signature> {
    let season = client.season(season_number).await?.ok_or_else(|| {
        crate::Error::PreconditionFailed(format!("season {season_number} is not initialized"))
    })?;
    if season.fee_collected {
        return Err(crate::Error::PreconditionFailed(format!(
            "fee of season {season_number} is already collected"
        )));
    }
    let ix = client
        .program()
        .collect_fee(&client.payer(), treasury, season_number)?;
    client.send(ix).await
}
