use ghsol_solana_utils::Ledger;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{constants::MIN_ADMIN_BALANCE, state::ProgramConfig, Client};

/// Outcome of [`initialize_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitConfigOutcome {
    /// The config was created with the payer as admin.
    Initialized(Signature),
    /// A config already exists.
    Exists {
        /// Current config.
        config: ProgramConfig,
        /// Whether the payer is the current admin.
        is_admin: bool,
    },
}

/// Create the program config with the payer as admin.
///
/// An existing config is reported instead of being re-initialized. The
/// payer must hold at least [`MIN_ADMIN_BALANCE`] lamports.
pub async fn initialize_config<L: Ledger>(client: &Client<L>) -> crate::Result<InitConfigOutcome> {
    client.ensure_balance(MIN_ADMIN_BALANCE).await?;

    if let Some(config) = client.program_config().await? {
        let is_admin = config.admin == client.payer();
        tracing::info!(admin = %config.admin, is_admin, "config already initialized");
        return Ok(InitConfigOutcome::Exists { config, is_admin });
    }

    let ix = client.program().initialize_config(&client.payer())?;
    let signature = client.send(ix).await?;
    Ok(InitConfigOutcome::Initialized(signature))
}

/// Hand the config admin over to `new_admin`.
///
/// The payer must be the current admin.
pub async fn transfer_admin<L: Ledger>(
    client: &Client<L>,
    new_admin: &Pubkey,
) -> crate::Result<Signature> {
    let config = client
        .program_config()
        .await?
        .ok_or_else(|| crate::Error::PreconditionFailed("config is not initialized".into()))?;
    if config.admin != client.payer() {
        return Err(crate::Error::PreconditionFailed(format!(
            "{} is not the admin, the current admin is {}",
            client.payer(),
            config.admin
        )));
    }
    let ix = client.program().transfer_admin(&client.payer(), new_admin)?;
    client.send(ix).await
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::Keypair;

    use super::*;
    use crate::{
        client::mock::MockLedger, instruction::Operation, state::tests::encode_config,
    };

    #[tokio::test]
    async fn insufficient_balance() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        ledger.set_balance(client.payer(), MIN_ADMIN_BALANCE - 1);
        let err = initialize_config(&client).await.unwrap_err();
        assert!(matches!(err, crate::Error::InsufficientBalance { .. }));
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn initializes_config() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        ledger.set_balance(client.payer(), MIN_ADMIN_BALANCE);
        let outcome = initialize_config(&client).await.unwrap();
        assert!(matches!(outcome, InitConfigOutcome::Initialized(_)));
        let sent = ledger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data, Operation::InitializeConfig.discriminator());
    }

    #[tokio::test]
    async fn existing_config_is_reported() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        ledger.set_balance(client.payer(), MIN_ADMIN_BALANCE);
        let config = ProgramConfig {
            admin: Pubkey::new_unique(),
            bump: 254,
        };
        ledger.set_account(client.program().find_config_address(), encode_config(&config));

        let outcome = initialize_config(&client).await.unwrap();
        assert_eq!(
            outcome,
            InitConfigOutcome::Exists {
                config,
                is_admin: false
            }
        );
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn transfer_requires_admin() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let new_admin = Pubkey::new_unique();
        assert!(transfer_admin(&client, &new_admin).await.is_err());

        let config = ProgramConfig {
            admin: Pubkey::new_unique(),
            bump: 254,
        };
        ledger.set_account(client.program().find_config_address(), encode_config(&config));
        let err = transfer_admin(&client, &new_admin).await.unwrap_err();
        assert!(matches!(err, crate::Error::PreconditionFailed(_)));

        let config = ProgramConfig {
            admin: client.payer(),
            bump: 254,
        };
        ledger.set_account(client.program().find_config_address(), encode_config(&config));
        transfer_admin(&client, &new_admin).await.unwrap();
        assert_eq!(ledger.sent().len(), 1);
    }
}
