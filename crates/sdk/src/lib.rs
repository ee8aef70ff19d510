#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # GHSOL SDK
//!
//! Client-side SDK for the season program: address derivation, instruction
//! payload encoding, account decoding, winner selection and the admin flows
//! built on top of them.

/// Error type.
pub mod error;

/// Constants.
pub mod constants;

/// Native token amounts.
pub mod amount;

/// Program-derived addresses.
pub mod pda;

/// Binary layout of instruction payloads and accounts.
pub mod layout;

/// Instruction payloads.
pub mod instruction;

/// Program error codes.
pub mod program_error;

/// Decoded program accounts.
pub mod state;

/// Instruction builders.
pub mod builders;

/// Leaderboard and winner selection.
pub mod leaderboard;

/// Client.
pub mod client;

/// Season admin flows.
pub mod season;

/// Backend API.
#[cfg(client)]
pub mod api;

pub use crate::{
    builders::SeasonProgram,
    client::Client,
    error::Error,
};

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

pub use ghsol_solana_utils as solana_utils;
pub use ghsol_solana_utils::Error as SolanaUtilsError;
pub use solana_sdk;
