// Season totals, averages and standings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{average, RosterId, WeeklyTable};

/// A roster's totals for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub roster_id: RosterId,
    pub team_name: String,
    pub owner_name: String,
    pub total_points: f64,
    pub weeks_played: u32,
    pub average_points: f64,
}

/// A summary placed in the season standings (1-based rank).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTeam {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: SeasonSummary,
}

/// Fold a season's weekly table into per-roster summaries.
///
/// Weeks are visited in ascending order. A roster's weeks_played counts only
/// the weeks it has an entry for; byes and unfetched weeks do not count.
pub fn summarize_season(table: &WeeklyTable) -> BTreeMap<RosterId, SeasonSummary> {
    let mut summaries: BTreeMap<RosterId, SeasonSummary> = BTreeMap::new();

    for entry in table.entries() {
        let summary = summaries
            .entry(entry.roster_id)
            .or_insert_with(|| SeasonSummary {
                roster_id: entry.roster_id,
                team_name: entry.team_name.clone(),
                owner_name: entry.owner_name.clone(),
                total_points: 0.0,
                weeks_played: 0,
                average_points: 0.0,
            });
        summary.total_points += entry.points;
        summary.weeks_played += 1;
    }

    for summary in summaries.values_mut() {
        summary.average_points = average(summary.total_points, summary.weeks_played);
    }
    summaries
}

/// Order summaries into standings: highest average first, then highest
/// total, then lowest roster id.
pub fn rank_summaries(summaries: &BTreeMap<RosterId, SeasonSummary>) -> Vec<RankedTeam> {
    let mut ordered: Vec<&SeasonSummary> = summaries.values().collect();
    ordered.sort_by(|a, b| {
        b.average_points
            .total_cmp(&a.average_points)
            .then_with(|| b.total_points.total_cmp(&a.total_points))
            .then_with(|| a.roster_id.cmp(&b.roster_id))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedTeam {
            rank: i + 1,
            summary: summary.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::table;
    use crate::model::{WeekScores, WeeklyTable};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn three_week_season_totals() {
        let t = table(2024, &[(1, 5, 100.0), (2, 5, 80.0), (3, 5, 120.0)]);
        let summaries = summarize_season(&t);
        let s = &summaries[&5];
        assert!(approx_eq(s.total_points, 300.0));
        assert_eq!(s.weeks_played, 3);
        assert!(approx_eq(s.average_points, 100.0));
        assert_eq!(s.team_name, "Team 5");
    }

    #[test]
    fn bye_week_not_counted() {
        let t = table(2024, &[(1, 7, 50.0), (1, 1, 90.0), (2, 1, 95.0), (3, 7, 70.0), (3, 1, 88.0)]);
        let summaries = summarize_season(&t);
        assert_eq!(summaries[&7].weeks_played, 2);
        assert!(approx_eq(summaries[&7].average_points, 60.0));
        assert_eq!(summaries[&1].weeks_played, 3);
    }

    #[test]
    fn empty_season_yields_empty_summaries() {
        let mut t = WeeklyTable::new(2022);
        assert!(summarize_season(&t).is_empty());
        t.weeks.insert(1, WeekScores::new());
        assert!(summarize_season(&t).is_empty());
    }

    #[test]
    fn zero_point_weeks_still_count() {
        let t = table(2024, &[(1, 2, 0.0), (2, 2, 0.0)]);
        let summaries = summarize_season(&t);
        let s = &summaries[&2];
        assert_eq!(s.weeks_played, 2);
        assert_eq!(s.average_points, 0.0);
    }

    #[test]
    fn summarize_is_idempotent() {
        let t = table(2024, &[(1, 1, 101.5), (1, 2, 99.25), (2, 1, 87.0)]);
        assert_eq!(summarize_season(&t), summarize_season(&t));
    }

    #[test]
    fn rank_by_average_then_total() {
        // Roster 1: avg 100 over 2 weeks (200). Roster 2: avg 100 over 1 week.
        // Roster 3: avg 120.
        let t = table(2024, &[(1, 1, 90.0), (1, 2, 100.0), (1, 3, 120.0), (2, 1, 110.0)]);
        let ranked = rank_summaries(&summarize_season(&t));
        let order: Vec<(usize, RosterId)> = ranked.iter().map(|r| (r.rank, r.summary.roster_id)).collect();
        assert_eq!(order, vec![(1, 3), (2, 1), (3, 2)]);
    }

    #[test]
    fn rank_full_tie_falls_back_to_roster_id() {
        let t = table(2024, &[(1, 4, 75.0), (1, 2, 75.0)]);
        let ranked = rank_summaries(&summarize_season(&t));
        assert_eq!(ranked[0].summary.roster_id, 2);
        assert_eq!(ranked[1].summary.roster_id, 4);
    }

    #[test]
    fn rank_empty() {
        assert!(rank_summaries(&BTreeMap::new()).is_empty());
    }
}
