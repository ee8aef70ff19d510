use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;

use crate::leaderboard::ParticipantRecord;

/// Season summary served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    /// Season number.
    pub season_number: u64,
    /// Display name.
    pub name: String,
    /// Status label.
    #[serde(default)]
    pub status: String,
    /// Season start (unix seconds).
    #[serde(default)]
    pub season_start: Option<i64>,
    /// Season end (unix seconds).
    #[serde(default)]
    pub season_end: Option<i64>,
    /// Prize pool in lamports.
    #[serde(default)]
    pub prize_pool: Decimal,
    /// Prize pool in whole coins.
    #[serde(rename = "prizePoolGOR", default)]
    pub prize_pool_coins: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct LeaderboardResponse {
    #[serde(default)]
    pub(super) leaderboard: Vec<ParticipantRecord>,
}

/// A season summary together with its leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonData {
    /// Summary.
    pub summary: SeasonSummary,
    /// Leaderboard entries.
    pub leaderboard: Vec<ParticipantRecord>,
}

/// Request registering a season with the backend.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonRequest {
    /// Season number.
    pub season_number: u64,
    /// Display name.
    pub name: String,
    /// Entry fee in whole coins.
    #[serde(with = "rust_decimal::serde::float")]
    pub entry_fee: Decimal,
    /// Registration opening time (unix seconds).
    pub registration_start: i64,
    /// Registration closing time (unix seconds).
    pub registration_end: i64,
    /// Season end time (unix seconds).
    pub season_end: i64,
    /// Season authority.
    #[serde_as(as = "DisplayFromStr")]
    pub authority: Pubkey,
    /// Oracle wallet.
    pub oracle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSeasonResponse {
    #[serde(rename = "seasonPDA", default)]
    pub(super) season_pda: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ErrorResponse {
    #[serde(default)]
    pub(super) error: Option<String>,
}

/// Outcome of [`BackendClient::create_season`](super::BackendClient::create_season).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateSeasonOutcome {
    /// The season was created.
    Created {
        /// Season address reported by the backend.
        season_address: Option<String>,
    },
    /// The backend already knows this season.
    AlreadyExists,
}
