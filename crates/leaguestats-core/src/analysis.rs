// Per-season analysis and the multi-season driver.
//
// Each season is analyzed on its own: identities, normalization, summaries,
// standings, rolling averages and extrema. A season that fails
// normalization is set aside and the rest carry on. Successful seasons are
// then combined in the order they were supplied.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::career::{career_summaries, CareerSummary};
use crate::combine::{combine_seasons, CombinedDataset};
use crate::error::StatsError;
use crate::extrema::{find_extrema, SeasonExtrema};
use crate::identity::resolve_identities;
use crate::model::{IdentityMap, RosterId, Season, WeeklyTable};
use crate::normalize::normalize_season;
use crate::raw::SeasonInput;
use crate::rolling::{rolling_averages, RollingAverageRecord};
use crate::season::{rank_summaries, summarize_season, RankedTeam, SeasonSummary};

/// Everything derived for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub season: Season,
    pub identities: IdentityMap,
    pub table: WeeklyTable,
    pub summaries: BTreeMap<RosterId, SeasonSummary>,
    pub standings: Vec<RankedTeam>,
    pub rolling: BTreeMap<RosterId, Vec<RollingAverageRecord>>,
    pub extrema: Option<SeasonExtrema>,
}

/// A season that could not be analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonFailure {
    pub season: Season,
    pub error: StatsError,
}

/// Result of a multi-season run. `seasons` keeps input order and only holds
/// seasons that analyzed cleanly.
#[derive(Debug, Clone)]
pub struct LeagueReport {
    pub seasons: Vec<SeasonReport>,
    pub failures: Vec<SeasonFailure>,
    pub combined: CombinedDataset,
    pub careers: BTreeMap<String, CareerSummary>,
}

impl LeagueReport {
    pub fn season(&self, season: Season) -> Option<&SeasonReport> {
        self.seasons.iter().find(|r| r.season == season)
    }
}

/// Analyze a single season.
pub fn analyze_season(input: &SeasonInput) -> Result<SeasonReport, StatsError> {
    let identities = resolve_identities(&input.users, &input.rosters);
    let table = normalize_season(input.season, &input.weeks, &identities)?;

    let summaries = summarize_season(&table);
    let standings = rank_summaries(&summaries);
    let rolling = rolling_averages(&table);
    let extrema = find_extrema(&table);

    Ok(SeasonReport {
        season: input.season,
        identities,
        table,
        summaries,
        standings,
        rolling,
        extrema,
    })
}

/// Analyze every season, then combine the ones that succeeded.
///
/// Seasons are independent of each other; only the combine step depends on
/// the order of `inputs`, which decides identity collisions.
pub fn analyze_league(inputs: &[SeasonInput]) -> LeagueReport {
    let mut seasons = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();

    for input in inputs {
        match analyze_season(input) {
            Ok(report) => {
                info!(
                    "season {}: {} weeks, {} entries, {} teams",
                    report.season,
                    report.table.weeks.len(),
                    report.table.entry_count(),
                    report.summaries.len()
                );
                seasons.push(report);
            }
            Err(e) => {
                warn!("skipping season {}: {}", input.season, e);
                failures.push(SeasonFailure {
                    season: input.season,
                    error: e,
                });
            }
        }
    }

    let combined = combine_seasons(seasons.iter().map(|r| (&r.table, &r.identities)));
    let careers = career_summaries(&combined);

    LeagueReport {
        seasons,
        failures,
        combined,
        careers,
    }
}
