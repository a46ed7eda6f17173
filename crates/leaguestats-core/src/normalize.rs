// Raw weekly matchup records → normalized weekly score table.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::StatsError;
use crate::model::{IdentityMap, RosterIdentity, Season, Week, WeekScores, WeeklyScoreEntry, WeeklyTable};
use crate::raw::RawMatchup;

/// Build a season's weekly table from its raw matchup listings.
///
/// Absent points become 0. A record without a roster id, with non-finite or
/// negative points, or repeating a roster within a week fails the whole season, as
/// does a week numbered 0. Weeks with no records stay in the table as empty
/// weeks. Rosters missing from `identities` are labelled with the
/// placeholder identity.
pub fn normalize_season(
    season: Season,
    weeks: &BTreeMap<Week, Vec<RawMatchup>>,
    identities: &IdentityMap,
) -> Result<WeeklyTable, StatsError> {
    let mut table = WeeklyTable::new(season);

    for (&week, records) in weeks {
        if week == 0 {
            return Err(StatsError::InvalidWeek { season });
        }
        if records.is_empty() {
            debug!("season {season} week {week}: no matchup records");
        }

        let mut scores = WeekScores::new();
        for (index, raw) in records.iter().enumerate() {
            let entry = normalize_record(season, week, index, raw, identities)?;
            let roster_id = entry.roster_id;
            if !scores.insert(entry) {
                return Err(StatsError::DuplicateEntry {
                    season,
                    week,
                    roster_id,
                });
            }
        }
        table.weeks.insert(week, scores);
    }

    Ok(table)
}

fn normalize_record(
    season: Season,
    week: Week,
    index: usize,
    raw: &RawMatchup,
    identities: &IdentityMap,
) -> Result<WeeklyScoreEntry, StatsError> {
    let roster_id = raw.roster_id.ok_or(StatsError::MissingRosterId {
        season,
        week,
        index,
    })?;

    let points = raw.points.unwrap_or(0.0);
    if !points.is_finite() {
        return Err(StatsError::NonFinitePoints {
            season,
            week,
            roster_id,
            points,
        });
    }
    if points < 0.0 {
        return Err(StatsError::NegativePoints {
            season,
            week,
            roster_id,
            points,
        });
    }

    let identity = identities
        .get(&roster_id)
        .cloned()
        .unwrap_or_else(|| RosterIdentity::placeholder(roster_id));

    Ok(WeeklyScoreEntry {
        season,
        week,
        roster_id,
        points,
        matchup_id: raw.matchup_id,
        starters: raw.starters.clone().unwrap_or_default(),
        players: raw.players.clone().unwrap_or_default(),
        team_name: identity.team_name,
        owner_name: identity.owner_name,
        username: identity.username,
    })
}
