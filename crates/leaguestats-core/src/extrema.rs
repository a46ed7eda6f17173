// Highest and lowest single-week scores of a season.

use serde::Serialize;

use crate::model::{RosterId, Week, WeeklyScoreEntry, WeeklyTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMark {
    pub roster_id: RosterId,
    pub team_name: String,
    pub week: Week,
    pub points: f64,
}

impl From<&WeeklyScoreEntry> for ScoreMark {
    fn from(entry: &WeeklyScoreEntry) -> Self {
        Self {
            roster_id: entry.roster_id,
            team_name: entry.team_name.clone(),
            week: entry.week,
            points: entry.points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonExtrema {
    pub highest: ScoreMark,
    pub lowest: ScoreMark,
}

/// Find the single highest and lowest scoring entries, or `None` for a
/// table with no entries.
///
/// Equal scores keep the first one met walking weeks ascending and source
/// order within a week. Which of several tied entries wins is therefore a
/// property of the input order, not of the teams.
pub fn find_extrema(table: &WeeklyTable) -> Option<SeasonExtrema> {
    let mut entries = table.entries();
    let first = entries.next()?;
    let (mut highest, mut lowest) = (first, first);

    for entry in entries {
        if entry.points > highest.points {
            highest = entry;
        }
        if entry.points < lowest.points {
            lowest = entry;
        }
    }

    Some(SeasonExtrema {
        highest: highest.into(),
        lowest: lowest.into(),
    })
}
