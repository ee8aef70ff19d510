use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

/// A solana program.
pub trait Program {
    /// Returns the current program ID.
    fn id(&self) -> &Pubkey;
}

impl<P: Program> Program for &P {
    fn id(&self) -> &Pubkey {
        (**self).id()
    }
}

/// Extension trait for [`Program`].
pub trait ProgramExt: Program {
    /// Create an [`InstructionBuilder`] with the given payload.
    fn instruction(&self, data: Vec<u8>) -> InstructionBuilder<Self>
    where
        Self: Sized,
    {
        InstructionBuilder {
            program: self,
            data,
            accounts: vec![],
        }
    }
}

impl<P: ?Sized + Program> ProgramExt for P {}

/// Generic Instruction Builder.
///
/// Accounts are kept in insertion order, which is part of the
/// instruction contract.
#[derive(Debug, Clone)]
pub struct InstructionBuilder<'a, P> {
    program: &'a P,
    data: Vec<u8>,
    accounts: Vec<AccountMeta>,
}

impl<P> InstructionBuilder<'_, P> {
    /// Append accounts to account list.
    pub fn accounts(mut self, mut accounts: Vec<AccountMeta>) -> Self {
        self.accounts.append(&mut accounts);
        self
    }

    /// Append a signer account.
    pub fn signer(self, pubkey: Pubkey, is_writable: bool) -> Self {
        self.account(pubkey, true, is_writable)
    }

    /// Append a writable non-signer account.
    pub fn writable(self, pubkey: Pubkey) -> Self {
        self.account(pubkey, false, true)
    }

    /// Append a read-only non-signer account.
    pub fn readonly(self, pubkey: Pubkey) -> Self {
        self.account(pubkey, false, false)
    }

    fn account(mut self, pubkey: Pubkey, is_signer: bool, is_writable: bool) -> Self {
        self.accounts.push(AccountMeta {
            pubkey,
            is_signer,
            is_writable,
        });
        self
    }
}

impl<P: Program> InstructionBuilder<'_, P> {
    /// Build an [`Instruction`].
    pub fn build(self) -> Instruction {
        Instruction {
            program_id: *self.program.id(),
            accounts: self.accounts,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestProgram(Pubkey);

    impl Program for TestProgram {
        fn id(&self) -> &Pubkey {
            &self.0
        }
    }

    #[test]
    fn build_keeps_account_order() {
        let program = TestProgram(Pubkey::new_unique());
        let payer = Pubkey::new_unique();
        let state = Pubkey::new_unique();
        let system = solana_sdk::system_program::ID;

        let ix = program
            .instruction(vec![1, 2, 3])
            .signer(payer, true)
            .writable(state)
            .readonly(system)
            .build();

        assert_eq!(ix.program_id, program.0);
        assert_eq!(ix.data, vec![1, 2, 3]);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(payer, true),
                AccountMeta::new(state, false),
                AccountMeta::new_readonly(system, false),
            ]
        );
    }
}
