#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # GHSOL Solana Utils

/// Error type.
pub mod error;

/// Program trait.
pub mod program_trait;

/// Signer.
pub mod signer;

/// Ledger access.
pub mod ledger;

/// Utils.
pub mod utils;

pub use crate::{
    error::{Error, SubmissionError},
    ledger::Ledger,
    program_trait::{InstructionBuilder, Program, ProgramExt},
};

#[cfg(client)]
pub use crate::ledger::RpcLedger;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(client)]
pub use solana_client;
pub use solana_sdk;
