use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{MAX_WINNERS, PRIZE_SHARES};

/// A leaderboard entry as served by the backend.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    /// Participant wallet.
    #[serde_as(as = "DisplayFromStr")]
    pub wallet: Pubkey,
    /// Gorbagio id.
    #[serde(default)]
    pub gorbagio_id: Option<u64>,
    /// Realized profit.
    #[serde(rename = "realizedPNL", default)]
    pub realized_pnl: Decimal,
    /// Return on investment, as a decimal string.
    pub roi: String,
    /// Number of trades.
    pub trades: u64,
    /// Win rate, as a decimal string.
    #[serde(default)]
    pub win_rate: String,
    /// Leaderboard rank.
    #[serde(default)]
    pub rank: u32,
    /// Whether the prize has been claimed.
    #[serde(default)]
    pub prize_claimed: bool,
}

impl ParticipantRecord {
    /// Returns whether the participant is eligible for a prize.
    pub fn is_eligible(&self) -> bool {
        self.trades > 0
    }

    /// Parse the ROI.
    pub fn parse_roi(&self) -> crate::Result<Decimal> {
        let roi = self.roi.trim();
        Decimal::from_str(roi)
            .or_else(|_| Decimal::from_scientific(roi))
            .map_err(|err| {
                crate::Error::invalid_argument(format!(
                    "invalid ROI `{}` of {}: {err}",
                    self.roi, self.wallet
                ))
            })
    }
}

/// An eligible participant with its parsed ROI.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedParticipant {
    /// Leaderboard entry.
    pub record: ParticipantRecord,
    /// Parsed ROI.
    pub roi: Decimal,
}

/// A selected winner.
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerAssignment {
    /// Leaderboard entry.
    pub record: ParticipantRecord,
    /// Parsed ROI.
    pub roi: Decimal,
    /// 1-based placement.
    pub placement: u8,
    /// Prize share in percent.
    pub share: u8,
}

impl WinnerAssignment {
    /// Prize amount for the given pool, rounded down.
    pub fn prize_amount(&self, pool: u64) -> u64 {
        let amount = u128::from(pool) * u128::from(self.share) / 100;
        // `share` never exceeds 100.
        u64::try_from(amount).unwrap_or(pool)
    }
}

/// Eligible participants ordered by ROI, highest first.
///
/// Participants without trades are dropped. Equal ROIs keep their input
/// order.
pub fn rank_eligible(records: &[ParticipantRecord]) -> crate::Result<Vec<RankedParticipant>> {
    let mut ranked = records
        .iter()
        .filter(|record| record.is_eligible())
        .map(|record| {
            Ok(RankedParticipant {
                roi: record.parse_roi()?,
                record: record.clone(),
            })
        })
        .collect::<crate::Result<Vec<_>>>()?;
    ranked.sort_by(|a, b| b.roi.cmp(&a.roi));
    Ok(ranked)
}

/// Select up to [`MAX_WINNERS`] winners and assign their prize shares.
///
/// An empty result means there is no eligible participant.
pub fn select_winners(records: &[ParticipantRecord]) -> crate::Result<Vec<WinnerAssignment>> {
    Ok(rank_eligible(records)?
        .into_iter()
        .take(MAX_WINNERS)
        .zip(PRIZE_SHARES)
        .zip(1u8..)
        .map(|((ranked, share), placement)| WinnerAssignment {
            record: ranked.record,
            roi: ranked.roi,
            placement,
            share,
        })
        .collect())
}
