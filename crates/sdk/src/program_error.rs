use crate::Error;

/// Base of custom error codes raised by the season program.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Errors raised by the season program.
///
/// Variant order defines the error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, strum::IntoStaticStr, strum::Display)]
pub enum SeasonProgramError {
    /// Season is not active.
    SeasonNotActive,
    /// Season is still active.
    SeasonStillActive,
    /// Registration is closed.
    RegistrationClosed,
    /// Season has not ended yet.
    SeasonNotEnded,
    /// Winners have already been set.
    WinnersAlreadySet,
    /// Winners have not been set.
    WinnersNotSet,
    /// Invalid number of winners.
    InvalidWinnerCount,
    /// Already registered.
    AlreadyRegistered,
    /// Not registered.
    NotRegistered,
    /// Not a winner.
    NotAWinner,
    /// Prize already claimed.
    PrizeAlreadyClaimed,
    /// Unauthorized.
    Unauthorized,
    /// Invalid entry fee.
    InvalidEntryFee,
    /// Arithmetic overflow.
    Overflow,
    /// Season name is too long.
    SeasonNameTooLong,
    /// Vault does not hold enough funds.
    InsufficientVaultFunds,
    /// Invalid placement.
    InvalidPlacement,
    /// Fee has already been collected.
    FeeAlreadyCollected,
    /// Registration has not ended yet.
    RegistrationNotEnded,
    /// Prize pool is empty.
    NoPrizePool,
}

impl SeasonProgramError {
    /// Custom error code.
    pub fn code(&self) -> u32 {
        ERROR_CODE_OFFSET + *self as u32
    }

    /// Error name.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Find the error with the given code.
    pub fn from_code(code: u32) -> Option<Self> {
        use strum::IntoEnumIterator;

        Self::iter().find(|err| err.code() == code)
    }

    /// Returns whether `err` is a rejected submission caused by this program error.
    ///
    /// Both the custom error code and the program logs are checked.
    pub fn matches(&self, err: &Error) -> bool {
        err.as_submission()
            .is_some_and(|submission| submission.is_program_error(self.code(), self.name()))
    }
}

#[cfg(test)]
mod tests {
    use ghsol_solana_utils::SubmissionError;

    use super::*;

    #[test]
    fn codes() {
        assert_eq!(SeasonProgramError::SeasonNotActive.code(), 6000);
        assert_eq!(SeasonProgramError::WinnersAlreadySet.code(), 6004);
        assert_eq!(SeasonProgramError::NoPrizePool.code(), 6019);
        assert_eq!(
            SeasonProgramError::from_code(6004),
            Some(SeasonProgramError::WinnersAlreadySet)
        );
        assert_eq!(SeasonProgramError::from_code(6020), None);
        assert_eq!(SeasonProgramError::WinnersAlreadySet.name(), "WinnersAlreadySet");
    }

    #[test]
    fn matches_by_code() {
        let err = Error::from(SubmissionError::new("transaction failed").with_code(6004));
        assert!(SeasonProgramError::WinnersAlreadySet.matches(&err));
        assert!(!SeasonProgramError::WinnersNotSet.matches(&err));
    }

    #[test]
    fn matches_by_logs() {
        let err = Error::from(SubmissionError::new("simulation failed").with_logs([
            "Program log: AnchorError occurred. Error Code: WinnersAlreadySet. Error Number: 6004.",
        ]));
        assert!(SeasonProgramError::WinnersAlreadySet.matches(&err));
    }

    #[test]
    fn other_errors_do_not_match() {
        let err = Error::custom("WinnersAlreadySet");
        assert!(!SeasonProgramError::WinnersAlreadySet.matches(&err));
    }
}
