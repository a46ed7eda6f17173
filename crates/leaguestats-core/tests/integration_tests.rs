// Integration tests for the statistics engine.
//
// Seasons are loaded from Sleeper-shaped JSON fixtures and run through the
// public API end to end: identity resolution, normalization, summaries,
// rolling averages, extrema, combining and career totals.

use leaguestats_core::analysis::{analyze_league, analyze_season};
use leaguestats_core::raw::SeasonInput;
use leaguestats_core::rolling::rolling_averages;
use leaguestats_core::season::summarize_season;
use leaguestats_core::StatsError;

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURES: &str = "tests/fixtures";

fn load_season(name: &str) -> SeasonInput {
    let path = format!("{FIXTURES}/{name}");
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("parse {path}: {e}"))
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ===========================================================================
// Single season
// ===========================================================================

#[test]
fn season_summaries_from_fixture() {
    let report = analyze_season(&load_season("season_2023.json")).unwrap();

    let danny = &report.summaries[&1];
    assert_eq!(danny.team_name, "Jack’s iPhone");
    assert_eq!(danny.owner_name, "Danny");
    assert!(approx_eq(danny.total_points, 300.0));
    assert_eq!(danny.weeks_played, 3);
    assert!(approx_eq(danny.average_points, 100.0));

    // Bye in week 3: two weeks only.
    let kyle = &report.summaries[&3];
    assert_eq!(kyle.weeks_played, 2);
    assert!(approx_eq(kyle.average_points, 115.0));

    // Orphaned roster with a null-points week counted as zero.
    let orphan = &report.summaries[&4];
    assert_eq!(orphan.team_name, "Team 4");
    assert_eq!(orphan.owner_name, "Unknown Owner");
    assert_eq!(orphan.weeks_played, 3);
    assert!(approx_eq(orphan.total_points, 148.0));
}

#[test]
fn empty_week_stays_in_table() {
    let report = analyze_season(&load_season("season_2023.json")).unwrap();
    assert_eq!(report.table.weeks.len(), 4);
    assert!(report.table.week(4).is_some_and(|w| w.is_empty()));
    assert_eq!(report.table.entry_count(), 11);
}

#[test]
fn rolling_averages_from_fixture() {
    let report = analyze_season(&load_season("season_2023.json")).unwrap();

    let danny = &report.rolling[&1];
    let averages: Vec<f64> = danny.iter().map(|r| r.average).collect();
    assert!(approx_eq(averages[0], 100.0));
    assert!(approx_eq(averages[1], 90.0));
    assert!(approx_eq(averages[2], 100.0));

    let kyle = &report.rolling[&3];
    assert_eq!(kyle.iter().map(|r| r.week).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(kyle.last().map(|r| r.weeks_included), Some(2));
}

#[test]
fn rolling_last_week_agrees_with_summary() {
    for name in ["season_2023.json", "season_2024.json"] {
        let report = analyze_season(&load_season(name)).unwrap();
        for (roster_id, records) in &report.rolling {
            let last = records.last().unwrap();
            let summary = &report.summaries[roster_id];
            assert!(approx_eq(last.average, summary.average_points), "{name} roster {roster_id}");
            assert!(approx_eq(last.total_points, summary.total_points));
        }
    }
}

#[test]
fn aggregation_is_idempotent() {
    let report = analyze_season(&load_season("season_2023.json")).unwrap();
    assert_eq!(summarize_season(&report.table), summarize_season(&report.table));
    assert_eq!(rolling_averages(&report.table), rolling_averages(&report.table));
}

#[test]
fn extrema_tie_goes_to_earliest_week() {
    // Roster 3 scored 120 in week 1, roster 1 scored 120 in week 3.
    let report = analyze_season(&load_season("season_2023.json")).unwrap();
    let extrema = report.extrema.unwrap();
    assert_eq!(extrema.highest.roster_id, 3);
    assert_eq!(extrema.highest.week, 1);
    assert_eq!(extrema.lowest.roster_id, 4);
    assert_eq!(extrema.lowest.week, 2);
    assert_eq!(extrema.lowest.points, 0.0);
}

#[test]
fn standings_from_fixture() {
    let report = analyze_season(&load_season("season_2023.json")).unwrap();
    let order: Vec<u32> = report.standings.iter().map(|r| r.summary.roster_id).collect();
    assert_eq!(order, vec![3, 1, 2, 4]);
    assert_eq!(report.standings[0].rank, 1);
    assert_eq!(report.standings[3].rank, 4);
}

// ===========================================================================
// Multiple seasons
// ===========================================================================

#[test]
fn combined_identity_is_last_season_but_entries_keep_names() {
    let league = analyze_league(&[load_season("season_2023.json"), load_season("season_2024.json")]);

    assert!(league.failures.is_empty());
    assert_eq!(league.combined.seasons, vec![2023, 2024]);
    assert_eq!(league.combined.identities[&1].team_name, "Josephine's Retribution");

    let old = league.combined.week(2023, 1).and_then(|w| w.get(1)).unwrap();
    let new = league.combined.week(2024, 1).and_then(|w| w.get(1)).unwrap();
    assert_eq!(old.team_name, "Jack’s iPhone");
    assert_eq!(new.team_name, "Josephine's Retribution");

    // Roster 2 and 4 only exist in 2023 and keep their identity.
    assert_eq!(league.combined.identities[&2].team_name, "SillyG00SE69");
    assert_eq!(league.combined.entry_count(), 15);
}

#[test]
fn careers_follow_owner_not_roster_id() {
    let league = analyze_league(&[load_season("season_2023.json"), load_season("season_2024.json")]);

    let danny = &league.careers["danny"];
    assert_eq!(danny.seasons, vec![2023, 2024]);
    assert_eq!(danny.weeks_played, 5);
    assert!(approx_eq(danny.total_points, 539.75));

    let kyle = &league.careers["kyle"];
    assert_eq!(kyle.weeks_played, 4);
    assert!(approx_eq(kyle.total_points, 461.25));

    assert!(!league.careers.contains_key("unknown"));
    assert_eq!(league.careers.len(), 3);
}

#[test]
fn team_history_across_seasons() {
    let league = analyze_league(&[load_season("season_2023.json"), load_season("season_2024.json")]);
    let hits = league.combined.team_history("iphone");
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|h| h.season == 2023));
}

#[test]
fn malformed_season_is_isolated() {
    let broken: SeasonInput = serde_json::from_str(
        r#"{
            "season": 2022,
            "users": [],
            "rosters": [{ "roster_id": 1, "owner_id": null }],
            "weeks": { "1": [{ "points": 50.0, "matchup_id": 1 }] }
        }"#,
    )
    .unwrap();

    let league = analyze_league(&[broken, load_season("season_2024.json")]);
    assert_eq!(league.failures.len(), 1);
    assert_eq!(
        league.failures[0].error,
        StatsError::MissingRosterId {
            season: 2022,
            week: 1,
            index: 0
        }
    );
    assert_eq!(league.seasons.len(), 1);
    assert_eq!(league.combined.seasons, vec![2024]);
}
