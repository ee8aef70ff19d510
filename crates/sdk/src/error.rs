use ghsol_solana_utils::SubmissionError;

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Solana utils error.
    #[error("{0}")]
    SolanaUtils(#[from] ghsol_solana_utils::Error),
    /// Address derivation error.
    #[error("address derivation: {0}")]
    AddressDerivation(String),
    /// A length does not fit its length prefix.
    #[error("encoding overflow: {0}")]
    EncodingOverflow(&'static str),
    /// Decode error.
    #[error("decode: {0}")]
    Decode(String),
    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A precondition of the requested operation does not hold.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    /// Insufficient balance.
    #[error("insufficient balance: {balance} lamports available, {required} required")]
    InsufficientBalance {
        /// Current balance.
        balance: u64,
        /// Required balance.
        required: u64,
    },
    /// HTTP error.
    #[cfg(feature = "reqwest")]
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    /// Backend API returned a non-success response.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or body snippet.
        message: String,
    },
    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Decimal error.
    #[error("decimal: {0}")]
    Decimal(#[from] rust_decimal::Error),
    /// Custom error.
    #[error("custom: {0}")]
    Custom(String),
}

impl Error {
    /// Create a custom error.
    pub fn custom(msg: impl ToString) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl ToString) -> Self {
        Self::InvalidArgument(msg.to_string())
    }

    /// Create a decode error.
    pub fn decode(msg: impl ToString) -> Self {
        Self::Decode(msg.to_string())
    }

    /// Returns the submission error if the ledger rejected a transaction.
    pub fn as_submission(&self) -> Option<&SubmissionError> {
        match self {
            Self::SolanaUtils(err) => err.as_submission(),
            _ => None,
        }
    }
}

impl From<SubmissionError> for Error {
    fn from(err: SubmissionError) -> Self {
        Self::SolanaUtils(err.into())
    }
}
