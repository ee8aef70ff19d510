use std::time::Duration;

use solana_sdk::pubkey::Pubkey;

mod season_program {
    solana_sdk::declare_id!("6GaTgaERTBDPchwd8RTMS9wvvdAiqb1aSCAthg21xJWa");
}

/// Season Program ID.
pub const PROGRAM_ID: Pubkey = season_program::ID;

/// Seed of the program config account.
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed of season accounts.
pub const SEASON_SEED: &[u8] = b"season";

/// Seed of participant accounts.
pub const PARTICIPANT_SEED: &[u8] = b"participant";

/// Seed of season vaults.
pub const VAULT_SEED: &[u8] = b"vault";

/// Decimals of the native token.
pub const NATIVE_DECIMALS: u32 = 9;

/// Lamports per whole native token.
pub const LAMPORTS_PER_COIN: u64 = 10u64.pow(NATIVE_DECIMALS);

/// Maximum number of winners of a season.
pub const MAX_WINNERS: usize = 3;

/// Maximum length of a season name in bytes.
pub const MAX_SEASON_NAME_LEN: usize = 32;

/// Prize share in percent, by placement.
pub const PRIZE_SHARES: [u8; MAX_WINNERS] = [50, 30, 20];

/// Minimum admin balance required to pay for config initialization.
pub const MIN_ADMIN_BALANCE: u64 = LAMPORTS_PER_COIN / 100;

/// Pause between consecutive prize submissions.
pub const PRIZE_SUBMISSION_INTERVAL: Duration = Duration::from_millis(500);
