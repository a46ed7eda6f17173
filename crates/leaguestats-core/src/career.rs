// Per-owner career totals across all combined seasons.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::combine::CombinedDataset;
use crate::model::{average, Season, UNKNOWN_USERNAME};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSummary {
    pub username: String,
    /// Display name from the most recent season the owner played.
    pub owner_name: String,
    pub seasons: Vec<Season>,
    pub total_points: f64,
    pub weeks_played: u32,
    pub average_points: f64,
}

/// Aggregate every entry by owner username.
///
/// Built from the entries themselves rather than the merged identity map, so
/// roster ids reused across seasons do not mix owners. Rosters without a
/// resolvable owner are left out.
pub fn career_summaries(dataset: &CombinedDataset) -> BTreeMap<String, CareerSummary> {
    let mut careers: BTreeMap<String, CareerSummary> = BTreeMap::new();

    for entry in dataset.iter_entries() {
        if entry.username == UNKNOWN_USERNAME {
            continue;
        }
        let career = careers
            .entry(entry.username.clone())
            .or_insert_with(|| CareerSummary {
                username: entry.username.clone(),
                owner_name: entry.owner_name.clone(),
                seasons: Vec::new(),
                total_points: 0.0,
                weeks_played: 0,
                average_points: 0.0,
            });

        if !career.seasons.contains(&entry.season) {
            career.seasons.push(entry.season);
        }
        // Entries arrive in ascending season order.
        career.owner_name.clone_from(&entry.owner_name);
        career.total_points += entry.points;
        career.weeks_played += 1;
    }

    for career in careers.values_mut() {
        career.seasons.sort_unstable();
        career.average_points = average(career.total_points, career.weeks_played);
    }
    careers
}
