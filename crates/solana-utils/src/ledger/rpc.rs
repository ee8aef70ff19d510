use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig, instruction::Instruction, pubkey::Pubkey,
    signature::Signature, signer::Signer, transaction::Transaction,
};

use crate::{error::SubmissionError, Ledger};

/// [`Ledger`] backed by a JSON RPC endpoint.
pub struct RpcLedger {
    client: RpcClient,
}

impl RpcLedger {
    /// Create a ledger connected to `url` with the given commitment.
    pub fn new(url: impl ToString, commitment: CommitmentConfig) -> crate::Result<Self> {
        let url = url::Url::parse(&url.to_string())?;
        Ok(Self {
            client: RpcClient::new_with_commitment(url.to_string(), commitment),
        })
    }

    /// Get the RPC endpoint URL.
    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Get the underlying RPC client.
    pub fn rpc(&self) -> &RpcClient {
        &self.client
    }
}

impl Ledger for RpcLedger {
    async fn get_account_data(&self, address: &Pubkey) -> crate::Result<Option<Vec<u8>>> {
        let res = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(Box::new)?;
        tracing::trace!(%address, slot = res.context.slot, "fetched account");
        Ok(res.value.map(|account| account.data))
    }

    async fn get_balance(&self, address: &Pubkey) -> crate::Result<u64> {
        Ok(self.client.get_balance(address).await.map_err(Box::new)?)
    }

    async fn send_instruction(
        &self,
        instruction: Instruction,
        payer: &dyn Signer,
    ) -> crate::Result<Signature> {
        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .map_err(Box::new)?;
        let payer_pubkey = payer.try_pubkey()?;
        let mut transaction = Transaction::new_with_payer(&[instruction], Some(&payer_pubkey));
        transaction.try_sign(&[payer], blockhash)?;
        tracing::debug!(%blockhash, payer = %payer_pubkey, "sending transaction");
        let signature = self
            .client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(SubmissionError::from)?;
        tracing::debug!(%signature, "transaction confirmed");
        Ok(signature)
    }
}
