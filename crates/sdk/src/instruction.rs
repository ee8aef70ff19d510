use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::MAX_WINNERS,
    layout::{Discriminator, Field, FieldKind, Payload},
};

/// Operations of the season program invoked by the admin flows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Create the program config.
    InitializeConfig,
    /// Hand over the config admin.
    TransferAdmin,
    /// Create a season and its vault.
    InitializeSeason,
    /// Collect the platform fee of a season.
    CollectFee,
    /// Record the winners of a season.
    SetWinners,
    /// Assign the prize of one placement.
    SetWinnerPrize,
    /// Close a season and reclaim the residual vault funds.
    CloseSeason,
}

impl Operation {
    /// The 8-byte tag prefixing the payload of this operation.
    ///
    /// Equal to the first 8 bytes of `sha256("global:<name>")`.
    pub const fn discriminator(&self) -> Discriminator {
        match self {
            Self::InitializeConfig => [208, 127, 21, 1, 194, 190, 196, 70],
            Self::TransferAdmin => [42, 242, 66, 106, 228, 10, 111, 156],
            Self::InitializeSeason => [48, 218, 111, 51, 235, 207, 4, 119],
            Self::CollectFee => [60, 173, 247, 103, 4, 93, 130, 48],
            Self::SetWinners => [96, 110, 12, 157, 13, 102, 230, 153],
            Self::SetWinnerPrize => [155, 185, 102, 82, 177, 37, 246, 89],
            Self::CloseSeason => [162, 198, 31, 37, 77, 0, 199, 152],
        }
    }

    /// Operation name as known by the program.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Create an empty payload for this operation.
    pub fn payload(&self) -> Payload {
        Payload::new(self.discriminator())
    }
}

/// Encode `initialize_config`.
pub fn initialize_config() -> crate::Result<Vec<u8>> {
    Operation::InitializeConfig.payload().encode()
}

/// Encode `transfer_admin`.
pub fn transfer_admin(new_admin: &Pubkey) -> crate::Result<Vec<u8>> {
    Operation::TransferAdmin
        .payload()
        .field(Field::Pubkey(*new_admin))
        .encode()
}

/// Encode `collect_fee`.
pub fn collect_fee() -> crate::Result<Vec<u8>> {
    Operation::CollectFee.payload().encode()
}

/// Encode `close_season`.
pub fn close_season() -> crate::Result<Vec<u8>> {
    Operation::CloseSeason.payload().encode()
}

/// Arguments of `initialize_season`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeSeasonArgs {
    /// Season number.
    pub season_number: u64,
    /// Display name.
    pub name: String,
    /// Entry fee in lamports.
    pub entry_fee: u64,
    /// Registration opening time (unix seconds).
    pub registration_start: i64,
    /// Registration closing time (unix seconds).
    pub registration_end: i64,
    /// Season end time (unix seconds).
    pub season_end: i64,
}

impl InitializeSeasonArgs {
    const KINDS: [FieldKind; 6] = [
        FieldKind::U64,
        FieldKind::String,
        FieldKind::U64,
        FieldKind::I64,
        FieldKind::I64,
        FieldKind::I64,
    ];

    /// Encode the `initialize_season` payload.
    pub fn encode(&self) -> crate::Result<Vec<u8>> {
        Operation::InitializeSeason
            .payload()
            .field(Field::U64(self.season_number))
            .field(Field::String(self.name.clone()))
            .field(Field::U64(self.entry_fee))
            .field(Field::I64(self.registration_start))
            .field(Field::I64(self.registration_end))
            .field(Field::I64(self.season_end))
            .encode()
    }

    /// Decode an `initialize_season` payload.
    pub fn decode(data: &[u8]) -> crate::Result<Self> {
        let fields = Payload::decode(
            data,
            &Operation::InitializeSeason.discriminator(),
            &Self::KINDS,
        )?
        .into_fields();
        match <[Field; 6]>::try_from(fields) {
            Ok(
                [Field::U64(season_number), Field::String(name), Field::U64(entry_fee), Field::I64(registration_start), Field::I64(registration_end), Field::I64(season_end)],
            ) => Ok(Self {
                season_number,
                name,
                entry_fee,
                registration_start,
                registration_end,
                season_end,
            }),
            _ => Err(crate::Error::decode("unexpected `initialize_season` fields")),
        }
    }
}

/// Encode `set_winners`.
///
/// The order of `winners` is the placement order.
pub fn set_winners(winners: &[Pubkey]) -> crate::Result<Vec<u8>> {
    Operation::SetWinners
        .payload()
        .field(Field::Pubkeys(winners.to_vec()))
        .encode()
}

/// Decode a `set_winners` payload.
pub fn decode_set_winners(data: &[u8]) -> crate::Result<Vec<Pubkey>> {
    let fields = Payload::decode(
        data,
        &Operation::SetWinners.discriminator(),
        &[FieldKind::Pubkeys],
    )?
    .into_fields();
    match fields.as_slice() {
        [Field::Pubkeys(winners)] => Ok(winners.clone()),
        _ => Err(crate::Error::decode("unexpected `set_winners` fields")),
    }
}

/// Encode `set_winner_prize`.
///
/// `placement` is 1-based and must not exceed [`MAX_WINNERS`].
pub fn set_winner_prize(placement: u8) -> crate::Result<Vec<u8>> {
    if placement == 0 || usize::from(placement) > MAX_WINNERS {
        return Err(crate::Error::invalid_argument(format!(
            "placement must be in 1..={MAX_WINNERS}, got {placement}"
        )));
    }
    Operation::SetWinnerPrize
        .payload()
        .field(Field::U8(placement))
        .encode()
}
