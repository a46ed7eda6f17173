// Multi-season merge of weekly tables and identity maps.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::model::{IdentityMap, Season, Week, WeekScores, WeeklyScoreEntry, WeeklyTable};

/// Every season's weekly scores under one roof.
///
/// `identities` is merged last-write-wins in input order. Roster ids are only
/// unique within a season, so a roster id reused by a different owner in a
/// later season takes over the earlier identity here. The entries keep the
/// team and owner fields they were normalized with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedDataset {
    pub entries: BTreeMap<(Season, Week), WeekScores>,
    pub identities: IdentityMap,
    /// Seasons in the order they were merged.
    pub seasons: Vec<Season>,
}

/// One week of one team, as returned by [`CombinedDataset::team_history`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamWeek {
    pub season: Season,
    pub week: Week,
    pub team_name: String,
    pub points: f64,
}

/// Merge seasons in the given order.
pub fn combine_seasons<'a, I>(seasons: I) -> CombinedDataset
where
    I: IntoIterator<Item = (&'a WeeklyTable, &'a IdentityMap)>,
{
    let mut combined = CombinedDataset::default();

    for (table, identities) in seasons {
        if combined.seasons.contains(&table.season) {
            warn!("season {} merged more than once, later weeks replace earlier ones", table.season);
        } else {
            combined.seasons.push(table.season);
        }

        for (&week, scores) in &table.weeks {
            combined.entries.insert((table.season, week), scores.clone());
        }
        for (&roster_id, identity) in identities {
            combined.identities.insert(roster_id, identity.clone());
        }
    }
    combined
}

impl CombinedDataset {
    /// All entries, ascending by (season, week), source order within a week.
    pub fn iter_entries(&self) -> impl Iterator<Item = &WeeklyScoreEntry> + '_ {
        self.entries.values().flat_map(|scores| scores.iter())
    }

    pub fn week(&self, season: Season, week: Week) -> Option<&WeekScores> {
        self.entries.get(&(season, week))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.values().map(WeekScores::len).sum()
    }

    /// Weekly scores of every team whose name contains `query`, ignoring
    /// case, across all seasons in chronological order.
    pub fn team_history(&self, query: &str) -> Vec<TeamWeek> {
        let needle = query.to_lowercase();
        self.iter_entries()
            .filter(|e| e.team_name.to_lowercase().contains(&needle))
            .map(|e| TeamWeek {
                season: e.season,
                week: e.week,
                team_name: e.team_name.clone(),
                points: e.points,
            })
            .collect()
    }
}
