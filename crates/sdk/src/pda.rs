use solana_sdk::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};

use crate::constants::{CONFIG_SEED, PARTICIPANT_SEED, SEASON_SEED, VAULT_SEED};

/// Find a program address from arbitrary seeds.
///
/// Unlike [`Pubkey::find_program_address`], seeds exceeding the derivation
/// limits are reported as an error instead of panicking. One seed slot is
/// reserved for the bump seed.
pub fn find_address(seeds: &[&[u8]], program_id: &Pubkey) -> crate::Result<(Pubkey, u8)> {
    if seeds.len() >= MAX_SEEDS {
        return Err(crate::Error::AddressDerivation(format!(
            "too many seeds: {} (at most {})",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((idx, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(crate::Error::AddressDerivation(format!(
            "seed {idx} is {} bytes long (at most {MAX_SEED_LEN})",
            seed.len()
        )));
    }
    Pubkey::try_find_program_address(seeds, program_id).ok_or_else(|| {
        crate::Error::AddressDerivation("unable to find a viable bump seed".to_string())
    })
}

/// Find the PDA for the program config account.
pub fn find_config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

/// Find the PDA for a season account.
///
/// The season number is a little-endian `u64` seed.
pub fn find_season_address(season_number: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEASON_SEED, &season_number.to_le_bytes()], program_id)
}

/// Find the PDA for the vault of a season.
pub fn find_vault_address(season: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, season.as_ref()], program_id)
}

/// Find the PDA for a participant account.
pub fn find_participant_address(
    season: &Pubkey,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PARTICIPANT_SEED, season.as_ref(), owner.as_ref()],
        program_id,
    )
}
