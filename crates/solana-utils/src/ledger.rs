//! Access to the ledger: account reads and instruction submission.

use std::future::Future;

use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Signature, signer::Signer,
};

/// RPC implementation.
#[cfg(client)]
pub mod rpc;

#[cfg(client)]
pub use rpc::RpcLedger;

/// A ledger that program instructions can be submitted to.
pub trait Ledger {
    /// Get the data of the account at `address`.
    /// Returns `None` if the account does not exist.
    fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> impl Future<Output = crate::Result<Option<Vec<u8>>>>;

    /// Get the lamport balance of the account at `address`.
    fn get_balance(&self, address: &Pubkey) -> impl Future<Output = crate::Result<u64>>;

    /// Sign the instruction with `payer` as fee payer, submit it, and wait
    /// for confirmation.
    fn send_instruction(
        &self,
        instruction: Instruction,
        payer: &dyn Signer,
    ) -> impl Future<Output = crate::Result<Signature>>;
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn get_account_data(
        &self,
        address: &Pubkey,
    ) -> impl Future<Output = crate::Result<Option<Vec<u8>>>> {
        (**self).get_account_data(address)
    }

    fn get_balance(&self, address: &Pubkey) -> impl Future<Output = crate::Result<u64>> {
        (**self).get_balance(address)
    }

    fn send_instruction(
        &self,
        instruction: Instruction,
        payer: &dyn Signer,
    ) -> impl Future<Output = crate::Result<Signature>> {
        (**self).send_instruction(instruction, payer)
    }
}
