/// Types of the backend API.
pub mod types;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::leaderboard::ParticipantRecord;

pub use self::types::{CreateSeasonOutcome, CreateSeasonRequest, SeasonData, SeasonSummary};
use self::types::{CreateSeasonResponse, ErrorResponse, LeaderboardResponse};

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "https://waste-management-trading-engine.onrender.com";

const SEASON_EXISTS: &str = "Season already exists";
const SNIPPET_LEN: usize = 1024;

/// Client of the competition backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    http: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// A path prefix in `base_url` is kept for every endpoint.
    pub fn try_new(base_url: &str) -> crate::Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(crate::SolanaUtilsError::from)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> crate::Result<Url> {
        Ok(self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(crate::SolanaUtilsError::from)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        serde_json::from_str(&text).map_err(|err| {
            crate::Error::decode(format!(
                "failed to decode response of `{path}`: {err} body_snippet: {}",
                snippet(&text)
            ))
        })
    }

    /// Fetch the summary of a season.
    pub async fn season(&self, season_number: u64) -> crate::Result<SeasonSummary> {
        self.get(&format!("/api/gorbage-hands/season/{season_number}"))
            .await
    }

    /// Fetch the leaderboard of a season.
    pub async fn leaderboard(&self, season_number: u64) -> crate::Result<Vec<ParticipantRecord>> {
        let resp: LeaderboardResponse = self
            .get(&format!(
                "/api/gorbage-hands/season/{season_number}/leaderboard"
            ))
            .await?;
        Ok(resp.leaderboard)
    }

    /// Fetch the summary and the leaderboard of a season concurrently.
    pub async fn season_data(&self, season_number: u64) -> crate::Result<SeasonData> {
        let (summary, leaderboard) = tokio::try_join!(
            self.season(season_number),
            self.leaderboard(season_number)
        )?;
        Ok(SeasonData {
            summary,
            leaderboard,
        })
    }

    /// Register a season with the backend.
    ///
    /// A season the backend already knows is not an error.
    pub async fn create_season(
        &self,
        request: &CreateSeasonRequest,
    ) -> crate::Result<CreateSeasonOutcome> {
        let url = self.endpoint("/api/gorbage-hands/admin/create-season")?;
        tracing::debug!(%url, season = request.season_number, "POST");
        let resp = self.http.post(url).json(request).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|resp| resp.error);
            if message.as_deref() == Some(SEASON_EXISTS) {
                return Ok(CreateSeasonOutcome::AlreadyExists);
            }
            return Err(match message {
                Some(message) => crate::Error::Api {
                    status: status.as_u16(),
                    message,
                },
                None => api_error(status, &text),
            });
        }

        let season_address = serde_json::from_str::<CreateSeasonResponse>(&text)
            .ok()
            .and_then(|resp| resp.season_pda);
        Ok(CreateSeasonOutcome::Created { season_address })
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}

fn api_error(status: StatusCode, text: &str) -> crate::Error {
    crate::Error::Api {
        status: status.as_u16(),
        message: snippet(text),
    }
}
