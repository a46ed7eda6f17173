// CSV and JSON export of analyzed league data.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use leaguestats_core::analysis::{LeagueReport, SeasonReport};
use leaguestats_core::career::CareerSummary;
use leaguestats_core::model::{RosterIdentity, Season, Week};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RollingRow<'a> {
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Week")]
    week: Week,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Rolling Average")]
    rolling_average: f64,
}

#[derive(Debug, Serialize)]
struct StandingRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Owner")]
    owner: &'a str,
    #[serde(rename = "Total Points")]
    total_points: f64,
    #[serde(rename = "Weeks Played")]
    weeks_played: u32,
    #[serde(rename = "Average Points")]
    average_points: f64,
}

#[derive(Debug, Serialize)]
struct CareerRow<'a> {
    #[serde(rename = "Owner")]
    owner: &'a str,
    #[serde(rename = "Username")]
    username: &'a str,
    #[serde(rename = "Seasons")]
    seasons: String,
    #[serde(rename = "Total Points")]
    total_points: f64,
    #[serde(rename = "Weeks Played")]
    weeks_played: u32,
    #[serde(rename = "Average Points")]
    average_points: f64,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    season: Season,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    seasons: &'a [SeasonReport],
    failures: Vec<FailureEntry>,
    careers: Vec<&'a CareerSummary>,
}

// ---------------------------------------------------------------------------
// Writer-based exporters (enable testing without temp files)
// ---------------------------------------------------------------------------

/// One row per (team, week) with the week's score and the season-to-date
/// average, grouped by team.
pub fn write_rolling_csv<W: Write>(report: &SeasonReport, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for (roster_id, records) in &report.rolling {
        let team = report
            .summaries
            .get(roster_id)
            .map(|s| s.team_name.clone())
            .unwrap_or_else(|| RosterIdentity::placeholder(*roster_id).team_name);
        for record in records {
            writer.serialize(RollingRow {
                team: &team,
                week: record.week,
                score: record.points,
                rolling_average: record.average,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_standings_csv<W: Write>(report: &SeasonReport, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for ranked in &report.standings {
        let s = &ranked.summary;
        writer.serialize(StandingRow {
            rank: ranked.rank,
            team: &s.team_name,
            owner: &s.owner_name,
            total_points: s.total_points,
            weeks_played: s.weeks_played,
            average_points: s.average_points,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_careers_csv<'a, W, I>(careers: I, out: W) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a CareerSummary>,
{
    let mut writer = csv::Writer::from_writer(out);
    for career in careers {
        let seasons = career
            .seasons
            .iter()
            .map(Season::to_string)
            .collect::<Vec<_>>()
            .join(";");
        writer.serialize(CareerRow {
            owner: &career.owner_name,
            username: &career.username,
            seasons,
            total_points: career.total_points,
            weeks_played: career.weeks_played,
            average_points: career.average_points,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_report_json<W: Write>(
    league: &LeagueReport,
    generated_at: DateTime<Utc>,
    out: W,
) -> Result<(), serde_json::Error> {
    let doc = ReportDocument {
        generated_at,
        seasons: &league.seasons,
        failures: league
            .failures
            .iter()
            .map(|f| FailureEntry {
                season: f.season,
                reason: f.error.to_string(),
            })
            .collect(),
        careers: league.careers.values().collect(),
    };
    serde_json::to_writer_pretty(out, &doc)
}

// ---------------------------------------------------------------------------
// Directory export
// ---------------------------------------------------------------------------

/// Write every export file into `dir`, creating it if needed. Returns the
/// paths written.
pub fn export_all(league: &LeagueReport, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();

    for report in &league.seasons {
        let path = dir.join(format!("rolling_{}.csv", report.season));
        write_rolling_csv(report, create(&path)?).map_err(|e| csv_error(&path, e))?;
        written.push(path);

        let path = dir.join(format!("summary_{}.csv", report.season));
        write_standings_csv(report, create(&path)?).map_err(|e| csv_error(&path, e))?;
        written.push(path);
    }

    let path = dir.join("careers.csv");
    write_careers_csv(league.careers.values(), create(&path)?).map_err(|e| csv_error(&path, e))?;
    written.push(path);

    let path = dir.join("report.json");
    write_report_json(league, Utc::now(), create(&path)?).map_err(|e| ExportError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    written.push(path);

    info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn csv_error(path: &Path, source: csv::Error) -> ExportError {
    ExportError::Csv {
        path: path.display().to_string(),
        source,
    }
}
