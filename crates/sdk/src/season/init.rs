use std::time::Duration;

use ghsol_solana_utils::Ledger;
use rust_decimal::Decimal;
use solana_sdk::signature::Signature;
use time::OffsetDateTime;

use crate::{
    amount::to_lamports,
    constants::MAX_SEASON_NAME_LEN,
    instruction::InitializeSeasonArgs,
    Client,
};

/// Registration window and end of a season, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonSchedule {
    /// Registration opening time.
    pub registration_start: i64,
    /// Registration closing time.
    pub registration_end: i64,
    /// Season end time.
    pub season_end: i64,
}

fn secs(duration: Duration) -> crate::Result<i64> {
    i64::try_from(duration.as_secs())
        .map_err(|_| crate::Error::invalid_argument(format!("duration is too long: {duration:?}")))
}

impl SeasonSchedule {
    /// Registration opens `opens_in` after `now` and lasts `registration`;
    /// the season ends `duration` after registration closes.
    pub fn from_now(
        now: OffsetDateTime,
        opens_in: Duration,
        registration: Duration,
        duration: Duration,
    ) -> crate::Result<Self> {
        let overflow = || crate::Error::invalid_argument("schedule overflows");
        let registration_start = now
            .unix_timestamp()
            .checked_add(secs(opens_in)?)
            .ok_or_else(overflow)?;
        let registration_end = registration_start
            .checked_add(secs(registration)?)
            .ok_or_else(overflow)?;
        let season_end = registration_end
            .checked_add(secs(duration)?)
            .ok_or_else(overflow)?;
        let schedule = Self {
            registration_start,
            registration_end,
            season_end,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check that the registration window is non-empty and closes before
    /// the season ends.
    pub fn validate(&self) -> crate::Result<()> {
        if self.registration_start >= self.registration_end {
            return Err(crate::Error::invalid_argument(
                "registration must end after it starts",
            ));
        }
        if self.registration_end >= self.season_end {
            return Err(crate::Error::invalid_argument(
                "season must end after registration closes",
            ));
        }
        Ok(())
    }

    /// Registration opening time.
    pub fn registration_start_time(&self) -> crate::Result<OffsetDateTime> {
        to_datetime(self.registration_start)
    }

    /// Registration closing time.
    pub fn registration_end_time(&self) -> crate::Result<OffsetDateTime> {
        to_datetime(self.registration_end)
    }

    /// Season end time.
    pub fn season_end_time(&self) -> crate::Result<OffsetDateTime> {
        to_datetime(self.season_end)
    }
}

fn to_datetime(timestamp: i64) -> crate::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(timestamp).map_err(crate::Error::invalid_argument)
}

/// Parameters of a new season.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeSeasonParams {
    /// Season number.
    pub season_number: u64,
    /// Display name.
    pub name: String,
    /// Entry fee in whole coins.
    pub entry_fee: Decimal,
    /// Schedule.
    pub schedule: SeasonSchedule,
}

impl InitializeSeasonParams {
    /// Check the parameters.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.is_empty() {
            return Err(crate::Error::invalid_argument("season name must not be empty"));
        }
        if self.name.len() > MAX_SEASON_NAME_LEN {
            return Err(crate::Error::invalid_argument(format!(
                "season name is {} bytes long (at most {MAX_SEASON_NAME_LEN})",
                self.name.len()
            )));
        }
        if self.entry_fee_lamports()? == 0 {
            return Err(crate::Error::invalid_argument("entry fee must be positive"));
        }
        self.schedule.validate()
    }

    /// Entry fee in lamports.
    pub fn entry_fee_lamports(&self) -> crate::Result<u64> {
        to_lamports(self.entry_fee)
    }

    /// Instruction arguments.
    pub fn to_args(&self) -> crate::Result<InitializeSeasonArgs> {
        self.validate()?;
        Ok(InitializeSeasonArgs {
            season_number: self.season_number,
            name: self.name.clone(),
            entry_fee: self.entry_fee_lamports()?,
            registration_start: self.schedule.registration_start,
            registration_end: self.schedule.registration_end,
            season_end: self.schedule.season_end,
        })
    }

    /// Backend request registering this season.
    #[cfg(client)]
    pub fn create_request(
        &self,
        authority: &solana_sdk::pubkey::Pubkey,
        oracle: &str,
    ) -> crate::api::CreateSeasonRequest {
        crate::api::CreateSeasonRequest {
            season_number: self.season_number,
            name: self.name.clone(),
            entry_fee: self.entry_fee,
            registration_start: self.schedule.registration_start,
            registration_end: self.schedule.registration_end,
            season_end: self.schedule.season_end,
            authority: *authority,
            oracle: oracle.to_string(),
        }
    }
}

/// Outcome of [`initialize_season`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSeasonOutcome {
    /// The season was initialized.
    Initialized(Signature),
    /// The season account already exists.
    AlreadyInitialized,
}

/// Initialize a season on-chain with the payer as authority.
///
/// Nothing is submitted if the season account already exists.
pub async fn initialize_season<L: Ledger>(
    client: &Client<L>,
    params: &InitializeSeasonParams,
) -> crate::Result<InitSeasonOutcome> {
    let args = params.to_args()?;
    let season = client.program().find_season_address(args.season_number);
    if client.account_exists(&season).await? {
        tracing::info!(%season, "season already initialized");
        return Ok(InitSeasonOutcome::AlreadyInitialized);
    }
    let ix = client.program().initialize_season(&client.payer(), &args)?;
    let signature = client.send(ix).await?;
    Ok(InitSeasonOutcome::Initialized(signature))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use solana_sdk::signature::Keypair;

    use super::*;
    use crate::client::mock::MockLedger;

    const MINUTE: Duration = Duration::from_secs(60);
    const DAY: Duration = Duration::from_secs(86_400);

    fn params() -> InitializeSeasonParams {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        InitializeSeasonParams {
            season_number: 2,
            name: "Season 2".to_string(),
            entry_fee: dec!(1000),
            schedule: SeasonSchedule::from_now(now, 5 * MINUTE, DAY, 7 * DAY).unwrap(),
        }
    }

    #[test]
    fn schedule_from_now() {
        let schedule = params().schedule;
        assert_eq!(schedule.registration_start, 1_700_000_300);
        assert_eq!(schedule.registration_end, 1_700_086_700);
        assert_eq!(schedule.season_end, 1_700_691_500);
    }

    #[test]
    fn empty_registration_is_rejected() {
        let now = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert!(SeasonSchedule::from_now(now, MINUTE, Duration::ZERO, DAY).is_err());
    }

    #[test]
    fn season_must_outlast_registration() {
        let now = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert!(SeasonSchedule::from_now(now, MINUTE, DAY, Duration::ZERO).is_err());
        assert!(SeasonSchedule::from_now(now, MINUTE, DAY, Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn zero_entry_fee_is_rejected() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let mut params = params();
        params.entry_fee = dec!(0);
        assert!(matches!(
            params.validate(),
            Err(crate::Error::InvalidArgument(_))
        ));
        assert!(initialize_season(&client, &params).await.is_err());
        assert!(ledger.sent().is_empty());
    }

    #[test]
    fn args_from_params() {
        let args = params().to_args().unwrap();
        assert_eq!(args.entry_fee, 1_000_000_000_000);
        assert_eq!(args.season_number, 2);
        assert_eq!(args.season_end, 1_700_691_500);
    }

    #[test]
    fn long_names_are_rejected() {
        let mut params = params();
        params.name = "x".repeat(MAX_SEASON_NAME_LEN);
        assert!(params.validate().is_ok());
        params.name.push('x');
        assert!(params.to_args().is_err());
        params.name = String::new();
        assert!(params.validate().is_err());
    }

    #[tokio::test]
    async fn initializes_new_season() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        let params = params();
        let outcome = initialize_season(&client, &params).await.unwrap();
        assert!(matches!(outcome, InitSeasonOutcome::Initialized(_)));
        let sent = ledger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            InitializeSeasonArgs::decode(&sent[0].data).unwrap(),
            params.to_args().unwrap()
        );
    }

    #[tokio::test]
    async fn existing_season_is_skipped() {
        let ledger = MockLedger::default();
        let client = Client::new(&ledger, Keypair::new());
        ledger.set_account(client.program().find_season_address(2), vec![0; 8]);
        let outcome = initialize_season(&client, &params()).await.unwrap();
        assert_eq!(outcome, InitSeasonOutcome::AlreadyInitialized);
        assert!(ledger.sent().is_empty());
    }

    #[cfg(client)]
    #[test]
    fn backend_request() {
        let authority = solana_sdk::pubkey::Pubkey::new_unique();
        let request = params().create_request(&authority, "oracle");
        assert_eq!(request.entry_fee, dec!(1000));
        assert_eq!(request.registration_start, 1_700_000_300);
        assert_eq!(request.authority, authority);
    }
}
