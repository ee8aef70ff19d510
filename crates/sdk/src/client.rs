use ghsol_solana_utils::Ledger;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    builders::SeasonProgram,
    state::{AccountData, Participant, ProgramConfig, Season},
};

/// Season program client.
pub struct Client<L> {
    program: SeasonProgram,
    ledger: L,
    payer: Keypair,
}

impl<L> Client<L> {
    /// Create a client for the default program.
    pub fn new(ledger: L, payer: Keypair) -> Self {
        Self {
            program: SeasonProgram::default(),
            ledger,
            payer,
        }
    }

    /// Use the given program.
    pub fn with_program(mut self, program: SeasonProgram) -> Self {
        self.program = program;
        self
    }

    /// Get the payer address.
    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Get the payer signer.
    pub fn signer(&self) -> &Keypair {
        &self.payer
    }

    /// Get the season program.
    pub fn program(&self) -> &SeasonProgram {
        &self.program
    }

    /// Get the ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

impl<L: Ledger> Client<L> {
    /// Submit an instruction paid and signed by the payer.
    pub async fn send(&self, instruction: Instruction) -> crate::Result<Signature> {
        let signature = self
            .ledger
            .send_instruction(instruction, &self.payer)
            .await?;
        tracing::info!(%signature, "instruction confirmed");
        Ok(signature)
    }

    /// Returns whether an account exists at `address`.
    pub async fn account_exists(&self, address: &Pubkey) -> crate::Result<bool> {
        Ok(self.ledger.get_account_data(address).await?.is_some())
    }

    /// Get the lamport balance of `address`.
    pub async fn balance(&self, address: &Pubkey) -> crate::Result<u64> {
        Ok(self.ledger.get_balance(address).await?)
    }

    /// Fetch and decode a program account.
    pub async fn account<T: AccountData>(&self, address: &Pubkey) -> crate::Result<Option<T>> {
        self.ledger
            .get_account_data(address)
            .await?
            .map(|data| T::decode(&data))
            .transpose()
    }

    /// Fetch the program config.
    pub async fn program_config(&self) -> crate::Result<Option<ProgramConfig>> {
        self.account(&self.program.find_config_address()).await
    }

    /// Fetch a season.
    pub async fn season(&self, season_number: u64) -> crate::Result<Option<Season>> {
        self.account(&self.program.find_season_address(season_number))
            .await
    }

    /// Fetch a participant of a season.
    pub async fn participant(
        &self,
        season_number: u64,
        owner: &Pubkey,
    ) -> crate::Result<Option<Participant>> {
        let season = self.program.find_season_address(season_number);
        self.account(&self.program.find_participant_address(&season, owner))
            .await
    }

    /// Get the vault balance of a season.
    pub async fn vault_balance(&self, season_number: u64) -> crate::Result<u64> {
        let season = self.program.find_season_address(season_number);
        self.balance(&self.program.find_vault_address(&season)).await
    }

    /// Ensure the payer holds at least `required` lamports.
    ///
    /// Returns the current balance.
    pub async fn ensure_balance(&self, required: u64) -> crate::Result<u64> {
        let balance = self.balance(&self.payer()).await?;
        if balance < required {
            return Err(crate::Error::InsufficientBalance { balance, required });
        }
        Ok(balance)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{collections::HashMap, sync::Mutex};

    use ghsol_solana_utils::SubmissionError;
    use solana_sdk::hash::hashv;

    use super::*;

    /// In-memory ledger recording submitted instructions.
    #[derive(Default)]
    pub(crate) struct MockLedger {
        accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
        balances: Mutex<HashMap<Pubkey, u64>>,
        rejections: Mutex<HashMap<Vec<u8>, SubmissionError>>,
        sent: Mutex<Vec<Instruction>>,
    }

    impl MockLedger {
        pub(crate) fn set_account(&self, address: Pubkey, data: Vec<u8>) {
            self.accounts.lock().unwrap().insert(address, data);
        }

        pub(crate) fn set_balance(&self, address: Pubkey, lamports: u64) {
            self.balances.lock().unwrap().insert(address, lamports);
        }

        /// Reject instructions carrying exactly `data`.
        pub(crate) fn reject(&self, data: Vec<u8>, err: SubmissionError) {
            self.rejections.lock().unwrap().insert(data, err);
        }

        pub(crate) fn sent(&self) -> Vec<Instruction> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Ledger for MockLedger {
        async fn get_account_data(
            &self,
            address: &Pubkey,
        ) -> ghsol_solana_utils::Result<Option<Vec<u8>>> {
            Ok(self.accounts.lock().unwrap().get(address).cloned())
        }

        async fn get_balance(&self, address: &Pubkey) -> ghsol_solana_utils::Result<u64> {
            Ok(self
                .balances
                .lock()
                .unwrap()
                .get(address)
                .copied()
                .unwrap_or_default())
        }

        async fn send_instruction(
            &self,
            instruction: Instruction,
            payer: &dyn Signer,
        ) -> ghsol_solana_utils::Result<Signature> {
            assert!(instruction
                .accounts
                .iter()
                .any(|meta| meta.is_signer && meta.pubkey == payer.pubkey()));
            self.sent.lock().unwrap().push(instruction.clone());
            if let Some(err) = self.rejections.lock().unwrap().get(&instruction.data) {
                return Err(err.clone().into());
            }
            let mut signature = [0u8; 64];
            signature[..32].copy_from_slice(hashv(&[instruction.data.as_slice()]).as_ref());
            Ok(Signature::from(signature))
        }
    }
}
