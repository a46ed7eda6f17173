// Season-to-date rolling averages per roster.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{average, RosterId, Week, WeeklyTable};

/// A roster's season-to-date figures as of one week it played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingAverageRecord {
    pub roster_id: RosterId,
    pub week: Week,
    /// Points scored in this week alone.
    pub points: f64,
    pub average: f64,
    pub weeks_included: u32,
    pub total_points: f64,
}

#[derive(Default)]
struct RunningTotal {
    total: f64,
    weeks: u32,
}

/// Compute the rolling average for every (roster, week) the roster has an
/// entry for.
///
/// One ascending pass over the weeks keeps a running total and count per
/// roster and snapshots it after each update. Weeks without an entry for a
/// roster are skipped for that roster, so a bye neither lowers its average
/// nor adds to weeks_included. Records for each roster come out sorted by
/// week.
pub fn rolling_averages(table: &WeeklyTable) -> BTreeMap<RosterId, Vec<RollingAverageRecord>> {
    let mut running: BTreeMap<RosterId, RunningTotal> = BTreeMap::new();
    let mut records: BTreeMap<RosterId, Vec<RollingAverageRecord>> = BTreeMap::new();

    for (&week, scores) in &table.weeks {
        for entry in scores {
            let acc = running.entry(entry.roster_id).or_default();
            acc.total += entry.points;
            acc.weeks += 1;

            records
                .entry(entry.roster_id)
                .or_default()
                .push(RollingAverageRecord {
                    roster_id: entry.roster_id,
                    week,
                    points: entry.points,
                    average: average(acc.total, acc.weeks),
                    weeks_included: acc.weeks,
                    total_points: acc.total,
                });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::table;
    use crate::season::summarize_season;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn three_week_rolling_average() {
        let t = table(2024, &[(1, 5, 100.0), (2, 5, 80.0), (3, 5, 120.0)]);
        let rolling = rolling_averages(&t);
        let recs = &rolling[&5];
        let averages: Vec<f64> = recs.iter().map(|r| r.average).collect();
        let included: Vec<u32> = recs.iter().map(|r| r.weeks_included).collect();
        let weeks: Vec<Week> = recs.iter().map(|r| r.week).collect();
        assert_eq!(weeks, vec![1, 2, 3]);
        assert_eq!(included, vec![1, 2, 3]);
        assert!(approx_eq(averages[0], 100.0));
        assert!(approx_eq(averages[1], 90.0));
        assert!(approx_eq(averages[2], 100.0));
        assert!(approx_eq(recs[2].total_points, 300.0));
        assert!(approx_eq(recs[1].points, 80.0));
    }

    #[test]
    fn bye_week_excluded_not_zero() {
        let t = table(2024, &[(1, 7, 50.0), (1, 3, 10.0), (2, 3, 20.0), (3, 7, 70.0)]);
        let rolling = rolling_averages(&t);
        let recs = &rolling[&7];
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].week, 3);
        assert_eq!(recs[1].weeks_included, 2);
        assert!(approx_eq(recs[1].average, 60.0));
    }

    #[test]
    fn late_joiner_starts_at_one() {
        let t = table(2024, &[(1, 1, 100.0), (2, 1, 100.0), (3, 1, 100.0), (3, 12, 64.0)]);
        let rolling = rolling_averages(&t);
        let recs = &rolling[&12];
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].week, 3);
        assert_eq!(recs[0].weeks_included, 1);
        assert!(approx_eq(recs[0].average, 64.0));
    }

    #[test]
    fn weeks_included_and_total_never_decrease() {
        let t = table(
            2024,
            &[(1, 1, 10.0), (2, 1, 0.0), (4, 1, 33.0), (5, 1, 12.5), (1, 2, 7.0), (5, 2, 3.0)],
        );
        for recs in rolling_averages(&t).values() {
            for pair in recs.windows(2) {
                assert!(pair[1].week > pair[0].week);
                assert!(pair[1].weeks_included >= pair[0].weeks_included);
                assert!(pair[1].total_points >= pair[0].total_points);
            }
        }
    }

    #[test]
    fn last_record_matches_season_average() {
        let t = table(
            2023,
            &[(1, 1, 121.3), (1, 2, 98.6), (2, 1, 77.1), (3, 2, 140.2), (4, 1, 105.0), (4, 2, 88.8)],
        );
        let rolling = rolling_averages(&t);
        let summaries = summarize_season(&t);
        for (roster_id, recs) in &rolling {
            let last = recs.last().unwrap();
            let summary = &summaries[roster_id];
            assert!(approx_eq(last.average, summary.average_points));
            assert_eq!(last.weeks_included, summary.weeks_played);
        }
    }

    #[test]
    fn rolling_is_idempotent() {
        let t = table(2024, &[(1, 1, 1.0), (2, 1, 2.0), (2, 2, 3.0)]);
        assert_eq!(rolling_averages(&t), rolling_averages(&t));
    }

    #[test]
    fn empty_table_has_no_records() {
        let t = table(2024, &[]);
        assert!(rolling_averages(&t).is_empty());
    }
}
