use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::MAX_WINNERS,
    layout::{Discriminator, Reader},
};

/// Decoded account of the season program.
pub trait AccountData: Sized {
    /// Account discriminator, the first 8 bytes of `sha256("account:<Name>")`.
    const DISCRIMINATOR: Discriminator;

    /// Decode the remaining fields after the discriminator.
    fn read_fields(reader: &mut Reader<'_>) -> crate::Result<Self>;

    /// Decode account data.
    ///
    /// Trailing bytes are ignored since accounts are allocated with their
    /// maximum size.
    fn decode(data: &[u8]) -> crate::Result<Self> {
        let mut reader = Reader::new(data);
        reader.discriminator(&Self::DISCRIMINATOR)?;
        Self::read_fields(&mut reader)
    }
}

/// Global program config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Admin.
    pub admin: Pubkey,
    /// Bump seed.
    pub bump: u8,
}

impl AccountData for ProgramConfig {
    const DISCRIMINATOR: Discriminator = [196, 210, 90, 231, 144, 149, 140, 63];

    fn read_fields(reader: &mut Reader<'_>) -> crate::Result<Self> {
        Ok(Self {
            admin: reader.pubkey()?,
            bump: reader.u8()?,
        })
    }
}

/// Season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// Authority.
    pub authority: Pubkey,
    /// Season number.
    pub season_number: u64,
    /// Name.
    pub name: String,
    /// Entry fee in lamports.
    pub entry_fee: u64,
    /// Prize pool in lamports.
    pub prize_pool: u64,
    /// Number of registered participants.
    pub participant_count: u64,
    /// Registration opening time.
    pub registration_start: i64,
    /// Registration closing time.
    pub registration_end: i64,
    /// Season end time.
    pub season_end: i64,
    /// Whether the season is active.
    pub is_active: bool,
    /// Whether the winners have been set.
    pub winners_set: bool,
    /// Winner slots in placement order.
    pub winners: [Pubkey; MAX_WINNERS],
    /// Number of filled winner slots.
    pub winner_count: u8,
    /// Bump seed.
    pub bump: u8,
    /// Bump seed of the vault.
    pub vault_bump: u8,
    /// Whether the platform fee has been collected.
    pub fee_collected: bool,
    /// Collected platform fee in lamports.
    pub fee_amount: u64,
}

impl Season {
    /// Returns the winners in placement order.
    pub fn winners(&self) -> &[Pubkey] {
        let count = usize::from(self.winner_count).min(MAX_WINNERS);
        &self.winners[..count]
    }

    /// Returns whether the season has ended at `now` (unix seconds).
    pub fn has_ended(&self, now: i64) -> bool {
        now > self.season_end
    }

    /// Returns whether registration is open at `now` (unix seconds).
    pub fn is_registration_open(&self, now: i64) -> bool {
        self.is_active && now >= self.registration_start && now <= self.registration_end
    }
}

impl AccountData for Season {
    const DISCRIMINATOR: Discriminator = [76, 67, 93, 156, 180, 157, 248, 47];

    fn read_fields(reader: &mut Reader<'_>) -> crate::Result<Self> {
        Ok(Self {
            authority: reader.pubkey()?,
            season_number: reader.u64()?,
            name: reader.string()?,
            entry_fee: reader.u64()?,
            prize_pool: reader.u64()?,
            participant_count: reader.u64()?,
            registration_start: reader.i64()?,
            registration_end: reader.i64()?,
            season_end: reader.i64()?,
            is_active: reader.bool()?,
            winners_set: reader.bool()?,
            winners: [reader.pubkey()?, reader.pubkey()?, reader.pubkey()?],
            winner_count: reader.u8()?,
            bump: reader.u8()?,
            vault_bump: reader.u8()?,
            fee_collected: reader.bool()?,
            fee_amount: reader.u64()?,
        })
    }
}

/// Participant of a season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Owner wallet.
    pub owner: Pubkey,
    /// Season address.
    pub season: Pubkey,
    /// Season number.
    pub season_number: u64,
    /// Registration time.
    pub registered_at: i64,
    /// Paid entry fee in lamports.
    pub entry_fee_paid: u64,
    /// Placement, `0` if not placed.
    pub placement: u8,
    /// Assigned prize in lamports.
    pub prize_amount: u64,
    /// Whether the prize has been claimed.
    pub prize_claimed: bool,
    /// Bump seed.
    pub bump: u8,
}

impl Participant {
    /// Returns whether this participant has been assigned a placement.
    pub fn is_placed(&self) -> bool {
        self.placement != 0
    }
}

impl AccountData for Participant {
    const DISCRIMINATOR: Discriminator = [32, 142, 108, 79, 247, 179, 54, 6];

    fn read_fields(reader: &mut Reader<'_>) -> crate::Result<Self> {
        Ok(Self {
            owner: reader.pubkey()?,
            season: reader.pubkey()?,
            season_number: reader.u64()?,
            registered_at: reader.i64()?,
            entry_fee_paid: reader.u64()?,
            placement: reader.u8()?,
            prize_amount: reader.u64()?,
            prize_claimed: reader.bool()?,
            bump: reader.u8()?,
        })
    }
}
