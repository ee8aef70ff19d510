/// Close-season flow.
pub mod close;

/// Program config management.
pub mod config;

/// Season initialization.
pub mod init;

/// Explicit season closure and fee collection.
pub mod finalize;

use solana_sdk::signature::Signature;

pub use self::{
    close::{CloseSeasonEvent, CloseSeasonOptions, CloseSeasonPlan, CloseSeasonReport, PlannedStep},
    config::InitConfigOutcome,
    finalize::{FinalizeReadiness, UnclaimedPrize},
    init::{InitSeasonOutcome, InitializeSeasonParams, SeasonSchedule},
};

/// Outcome of a submission whose effect may already be in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The instruction was confirmed.
    Submitted(Signature),
    /// The ledger reported the effect as already applied.
    AlreadySatisfied,
}

impl SubmitOutcome {
    /// Returns the signature if an instruction was confirmed.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Submitted(signature) => Some(signature),
            Self::AlreadySatisfied => None,
        }
    }
}
