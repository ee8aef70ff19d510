use ghsol_solana_utils::{Program, ProgramExt};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use typed_builder::TypedBuilder;

use crate::{
    constants::PROGRAM_ID,
    instruction::{self, InitializeSeasonArgs},
    pda,
};

/// A season program.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SeasonProgram {
    /// Program ID.
    #[builder(default = PROGRAM_ID, setter(into))]
    pub id: Pubkey,
}

impl Default for SeasonProgram {
    fn default() -> Self {
        Self { id: PROGRAM_ID }
    }
}

impl Program for SeasonProgram {
    fn id(&self) -> &Pubkey {
        &self.id
    }
}

impl SeasonProgram {
    /// Find the program config address.
    pub fn find_config_address(&self) -> Pubkey {
        pda::find_config_address(&self.id).0
    }

    /// Find season address.
    pub fn find_season_address(&self, season_number: u64) -> Pubkey {
        pda::find_season_address(season_number, &self.id).0
    }

    /// Find vault address of the given season.
    pub fn find_vault_address(&self, season: &Pubkey) -> Pubkey {
        pda::find_vault_address(season, &self.id).0
    }

    /// Find participant address.
    pub fn find_participant_address(&self, season: &Pubkey, owner: &Pubkey) -> Pubkey {
        pda::find_participant_address(season, owner, &self.id).0
    }

    /// Create an `initialize_config` instruction.
    pub fn initialize_config(&self, admin: &Pubkey) -> crate::Result<Instruction> {
        Ok(self
            .instruction(instruction::initialize_config()?)
            .signer(*admin, true)
            .writable(self.find_config_address())
            .readonly(system_program::ID)
            .build())
    }

    /// Create a `transfer_admin` instruction.
    pub fn transfer_admin(&self, admin: &Pubkey, new_admin: &Pubkey) -> crate::Result<Instruction> {
        Ok(self
            .instruction(instruction::transfer_admin(new_admin)?)
            .signer(*admin, false)
            .writable(self.find_config_address())
            .build())
    }

    /// Create an `initialize_season` instruction.
    pub fn initialize_season(
        &self,
        authority: &Pubkey,
        args: &InitializeSeasonArgs,
    ) -> crate::Result<Instruction> {
        let season = self.find_season_address(args.season_number);
        Ok(self
            .instruction(args.encode()?)
            .signer(*authority, true)
            .readonly(self.find_config_address())
            .writable(season)
            .readonly(self.find_vault_address(&season))
            .readonly(system_program::ID)
            .build())
    }

    /// Create a `collect_fee` instruction.
    pub fn collect_fee(
        &self,
        authority: &Pubkey,
        treasury: &Pubkey,
        season_number: u64,
    ) -> crate::Result<Instruction> {
        let season = self.find_season_address(season_number);
        Ok(self
            .instruction(instruction::collect_fee()?)
            .signer(*authority, false)
            .writable(*treasury)
            .writable(season)
            .writable(self.find_vault_address(&season))
            .readonly(system_program::ID)
            .build())
    }

    /// Create a `set_winners` instruction.
    pub fn set_winners(
        &self,
        authority: &Pubkey,
        season_number: u64,
        winners: &[Pubkey],
    ) -> crate::Result<Instruction> {
        Ok(self
            .instruction(instruction::set_winners(winners)?)
            .signer(*authority, false)
            .writable(self.find_season_address(season_number))
            .build())
    }

    /// Create a `set_winner_prize` instruction for the winner at `placement`.
    pub fn set_winner_prize(
        &self,
        authority: &Pubkey,
        season_number: u64,
        winner: &Pubkey,
        placement: u8,
    ) -> crate::Result<Instruction> {
        let season = self.find_season_address(season_number);
        Ok(self
            .instruction(instruction::set_winner_prize(placement)?)
            .signer(*authority, false)
            .readonly(season)
            .writable(self.find_participant_address(&season, winner))
            .build())
    }

    /// Create a `close_season` instruction.
    pub fn close_season(&self, authority: &Pubkey, season_number: u64) -> crate::Result<Instruction> {
        let season = self.find_season_address(season_number);
        Ok(self
            .instruction(instruction::close_season()?)
            .signer(*authority, true)
            .writable(season)
            .writable(self.find_vault_address(&season))
            .readonly(system_program::ID)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::instruction::AccountMeta;

    use super::*;
    use crate::instruction::Operation;

    #[test]
    fn default_program_id() {
        assert_eq!(SeasonProgram::default().id, PROGRAM_ID);
        assert_eq!(SeasonProgram::builder().build().id, PROGRAM_ID);
        let other = Pubkey::new_unique();
        assert_eq!(SeasonProgram::builder().id(other).build().id, other);
    }

    #[test]
    fn set_winners_accounts() {
        let program = SeasonProgram::default();
        let authority = Pubkey::new_unique();
        let winners = [Pubkey::new_unique()];
        let ix = program.set_winners(&authority, 3, &winners).unwrap();
        assert_eq!(ix.program_id, PROGRAM_ID);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new(program.find_season_address(3), false),
            ]
        );
        assert_eq!(&ix.data[..8], &Operation::SetWinners.discriminator());
    }

    #[test]
    fn set_winner_prize_accounts() {
        let program = SeasonProgram::default();
        let authority = Pubkey::new_unique();
        let winner = Pubkey::new_unique();
        let season = program.find_season_address(3);
        let ix = program.set_winner_prize(&authority, 3, &winner, 2).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new_readonly(season, false),
                AccountMeta::new(program.find_participant_address(&season, &winner), false),
            ]
        );
        assert_eq!(ix.data[8], 2);
        assert!(program.set_winner_prize(&authority, 3, &winner, 0).is_err());
    }

    #[test]
    fn close_season_accounts() {
        let program = SeasonProgram::default();
        let authority = Pubkey::new_unique();
        let season = program.find_season_address(3);
        let ix = program.close_season(&authority, 3).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(authority, true),
                AccountMeta::new(season, false),
                AccountMeta::new(program.find_vault_address(&season), false),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
        assert_eq!(ix.data, Operation::CloseSeason.discriminator());
    }

    #[test]
    fn initialize_season_accounts() {
        let program = SeasonProgram::default();
        let authority = Pubkey::new_unique();
        let args = InitializeSeasonArgs {
            season_number: 2,
            name: "Season 2".to_string(),
            entry_fee: 1,
            registration_start: 1,
            registration_end: 2,
            season_end: 3,
        };
        let season = program.find_season_address(2);
        let ix = program.initialize_season(&authority, &args).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(program.find_config_address(), false),
                AccountMeta::new(season, false),
                AccountMeta::new_readonly(program.find_vault_address(&season), false),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
        assert_eq!(InitializeSeasonArgs::decode(&ix.data).unwrap(), args);
    }

    #[test]
    fn config_accounts() {
        let program = SeasonProgram::default();
        let admin = Pubkey::new_unique();
        let new_admin = Pubkey::new_unique();
        let ix = program.initialize_config(&admin).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(admin, true),
                AccountMeta::new(program.find_config_address(), false),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
        let ix = program.transfer_admin(&admin, &new_admin).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new_readonly(admin, true),
                AccountMeta::new(program.find_config_address(), false),
            ]
        );
        assert_eq!(&ix.data[8..], new_admin.as_ref());
    }

    #[test]
    fn collect_fee_accounts() {
        let program = SeasonProgram::default();
        let authority = Pubkey::new_unique();
        let treasury = Pubkey::new_unique();
        let season = program.find_season_address(4);
        let ix = program.collect_fee(&authority, &treasury, 4).unwrap();
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new(treasury, false),
                AccountMeta::new(season, false),
                AccountMeta::new(program.find_vault_address(&season), false),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
    }
}
