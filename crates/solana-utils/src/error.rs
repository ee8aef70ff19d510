use std::fmt;

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Load keypair error.
    #[error("load keypair from `{path}`: {message}")]
    LoadKeypair {
        /// The (expanded) path of the keypair file.
        path: String,
        /// Reason.
        message: String,
    },
    /// Parse url error.
    #[error("parse url: {0}")]
    ParseUrl(#[from] url::ParseError),
    /// Client error.
    #[cfg(feature = "solana-client")]
    #[error("client: {0}")]
    Client(#[from] Box<solana_client::client_error::ClientError>),
    /// The ledger rejected a submitted transaction.
    #[error("submission: {0}")]
    Submission(SubmissionError),
    /// Signer error.
    #[error("signer: {0}")]
    Signer(#[from] solana_sdk::signer::SignerError),
    /// Custom error.
    #[error("custom: {0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Returns the submission error if this is one.
    pub fn as_submission(&self) -> Option<&SubmissionError> {
        match self {
            Self::Submission(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SubmissionError> for Error {
    fn from(err: SubmissionError) -> Self {
        Self::Submission(err)
    }
}

/// Details of a rejected transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionError {
    /// Error message reported by the ledger.
    pub message: String,
    /// Program log lines from the failed simulation, if any.
    pub logs: Vec<String>,
    /// Custom program error code, if the failure was raised by a program.
    pub code: Option<u32>,
}

impl SubmissionError {
    /// Create a submission error from a message.
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            ..Default::default()
        }
    }

    /// Attach program logs.
    pub fn with_logs(mut self, logs: impl IntoIterator<Item = impl ToString>) -> Self {
        self.logs = logs.into_iter().map(|log| log.to_string()).collect();
        self
    }

    /// Attach a custom program error code.
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Returns whether the failure was the given program error.
    ///
    /// Matches either the custom error code or the error name appearing in
    /// the message or the program logs.
    pub fn is_program_error(&self, code: u32, name: &str) -> bool {
        self.code == Some(code)
            || self.message.contains(name)
            || self.logs.iter().any(|log| log.contains(name))
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = self.code {
            write!(f, " (custom program error: {code:#x})")?;
        }
        if !self.logs.is_empty() {
            write!(f, "\nProgram logs:")?;
            for log in &self.logs {
                write!(f, "\n  {log}")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "solana-client")]
impl From<solana_client::client_error::ClientError> for SubmissionError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        use solana_client::{
            client_error::ClientErrorKind,
            rpc_request::{RpcError, RpcResponseErrorData},
        };
        use solana_sdk::{instruction::InstructionError, transaction::TransactionError};

        let logs = match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
                ..
            }) => result.logs.clone().unwrap_or_default(),
            _ => Vec::new(),
        };
        let code = match err.get_transaction_error() {
            Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) => {
                Some(code)
            }
            _ => None,
        };
        Self {
            message: err.to_string(),
            logs,
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_error_matched_by_code() {
        let err = SubmissionError::new("Transaction simulation failed").with_code(6004);
        assert!(err.is_program_error(6004, "WinnersAlreadySet"));
        assert!(!err.is_program_error(6005, "WinnersNotSet"));
    }

    #[test]
    fn program_error_matched_by_logs() {
        let err = SubmissionError::new("Transaction simulation failed").with_logs([
            "Program log: Instruction: SetWinners",
            "Program log: AnchorError occurred. Error Code: WinnersAlreadySet. Error Number: 6004.",
        ]);
        assert!(err.is_program_error(6004, "WinnersAlreadySet"));
        assert!(!err.is_program_error(6011, "Unauthorized"));
    }

    #[test]
    fn display_includes_code() {
        let err = SubmissionError::new("failed").with_code(6004);
        assert_eq!(err.to_string(), "failed (custom program error: 0x1774)");
        let err = Error::from(err);
        assert!(err.as_submission().is_some());
    }

    #[test]
    fn display_includes_logs() {
        let err = Error::from(
            SubmissionError::new("Transaction simulation failed")
                .with_code(3003)
                .with_logs([
                    "Program log: Instruction: SetWinners",
                    "Program log: Error Code: SeasonNotEnded.",
                ]),
        );
        assert_eq!(
            err.to_string(),
            "submission: Transaction simulation failed (custom program error: 0xbbb)\n\
             Program logs:\n  \
             Program log: Instruction: SetWinners\n  \
             Program log: Error Code: SeasonNotEnded."
        );
    }
}
