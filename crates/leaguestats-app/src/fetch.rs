// League data source: the Sleeper HTTP API and the season collector.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use leaguestats_core::model::{Season, Week};
use leaguestats_core::raw::{RawMatchup, RawRoster, RawUser, SeasonInput};

use crate::config::SeasonSource;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Anything that can hand over a league's rosters, users and weekly matchups.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn rosters(&self, league_id: &str) -> Result<Vec<RawRoster>, FetchError>;
    async fn users(&self, league_id: &str) -> Result<Vec<RawUser>, FetchError>;
    async fn matchups(&self, league_id: &str, week: Week) -> Result<Vec<RawMatchup>, FetchError>;
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

/// Read-only client for the public Sleeper league endpoints.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn rosters_url(&self, league_id: &str) -> String {
        format!("{}/league/{league_id}/rosters", self.base_url)
    }

    pub fn users_url(&self, league_id: &str) -> String {
        format!("{}/league/{league_id}/users", self.base_url)
    }

    pub fn matchups_url(&self, league_id: &str, week: Week) -> String {
        format!("{}/league/{league_id}/matchups/{week}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode { url, source: e })
    }
}

#[async_trait]
impl LeagueSource for SleeperClient {
    async fn rosters(&self, league_id: &str) -> Result<Vec<RawRoster>, FetchError> {
        self.get_json(self.rosters_url(league_id)).await
    }

    async fn users(&self, league_id: &str) -> Result<Vec<RawUser>, FetchError> {
        self.get_json(self.users_url(league_id)).await
    }

    async fn matchups(&self, league_id: &str, week: Week) -> Result<Vec<RawMatchup>, FetchError> {
        // Sleeper answers `null` for weeks it has nothing for.
        let matchups: Option<Vec<RawMatchup>> =
            self.get_json(self.matchups_url(league_id, week)).await?;
        Ok(matchups.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Fetch everything needed to analyze one season.
///
/// Rosters and users are required; if either request fails the season fails.
/// Weeks `1..=max_week` are requested concurrently. A week whose request
/// fails is logged and left out. A week that comes back empty is kept as an
/// empty week.
pub async fn collect_season<S: LeagueSource + ?Sized>(
    source: &S,
    season: &SeasonSource,
    max_week: Week,
) -> Result<SeasonInput, FetchError> {
    let league_id = season.league_id.as_str();
    info!("Fetching season {} (league {league_id})", season.season);

    let rosters = source.rosters(league_id).await?;
    let users = source.users(league_id).await?;

    let requests = (1..=max_week).map(|week| async move { (week, source.matchups(league_id, week).await) });
    let results = join_all(requests).await;

    let mut weeks = BTreeMap::new();
    for (week, result) in results {
        match result {
            Ok(matchups) => {
                if matchups.is_empty() {
                    debug!("season {} week {week}: no matchups", season.season);
                }
                weeks.insert(week, matchups);
            }
            Err(e) => warn!("season {} week {week}: skipping, {e}", season.season),
        }
    }

    info!(
        "Season {}: {} rosters, {} users, {}/{} weeks fetched",
        season.season,
        rosters.len(),
        users.len(),
        weeks.len(),
        max_week
    );

    Ok(SeasonInput {
        season: season.season,
        users,
        rosters,
        weeks,
    })
}

/// Collect every configured season in order. Seasons that fail to fetch are
/// logged and returned separately so the rest can still be analyzed.
pub async fn collect_seasons<S: LeagueSource + ?Sized>(
    source: &S,
    seasons: &[SeasonSource],
    max_week: Week,
) -> (Vec<SeasonInput>, Vec<(Season, FetchError)>) {
    let mut inputs = Vec::with_capacity(seasons.len());
    let mut failures = Vec::new();
    for season in seasons {
        match collect_season(source, season, max_week).await {
            Ok(input) => inputs.push(input),
            Err(e) => {
                warn!("season {}: fetch failed, {e}", season.season);
                failures.push((season.season, e));
            }
        }
    }
    (inputs, failures)
}
