// Core identifiers, identities and the normalized weekly score table.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub type Season = u16;
pub type Week = u32;
pub type RosterId = u32;

pub const UNKNOWN_OWNER: &str = "Unknown Owner";
pub const UNKNOWN_USERNAME: &str = "unknown";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The team and owner behind a roster id for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterIdentity {
    pub roster_id: RosterId,
    pub team_name: String,
    pub owner_name: String,
    pub username: String,
}

impl RosterIdentity {
    /// Identity used when a roster has no resolvable owner.
    pub fn placeholder(roster_id: RosterId) -> Self {
        Self {
            roster_id,
            team_name: format!("Team {roster_id}"),
            owner_name: UNKNOWN_OWNER.to_string(),
            username: UNKNOWN_USERNAME.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.username == UNKNOWN_USERNAME
    }
}

pub type IdentityMap = BTreeMap<RosterId, RosterIdentity>;

// ---------------------------------------------------------------------------
// Weekly scores
// ---------------------------------------------------------------------------

/// One roster's score for one week of one season, with its identity
/// denormalized alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyScoreEntry {
    pub season: Season,
    pub week: Week,
    pub roster_id: RosterId,
    pub points: f64,
    pub matchup_id: Option<u32>,
    pub starters: Vec<String>,
    pub players: Vec<String>,
    pub team_name: String,
    pub owner_name: String,
    pub username: String,
}

/// All entries recorded for a single week, in the order the source listed
/// them. At most one entry per roster id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeekScores {
    entries: Vec<WeeklyScoreEntry>,
}

impl WeekScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Returns `false` (and leaves the week untouched) when
    /// the roster already has an entry this week.
    pub fn insert(&mut self, entry: WeeklyScoreEntry) -> bool {
        if self.get(entry.roster_id).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn get(&self, roster_id: RosterId) -> Option<&WeeklyScoreEntry> {
        self.entries.iter().find(|e| e.roster_id == roster_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeeklyScoreEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WeeklyScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a WeekScores {
    type Item = &'a WeeklyScoreEntry;
    type IntoIter = std::slice::Iter<'a, WeeklyScoreEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A season's normalized scores keyed by week. Weeks iterate in ascending
/// order, which is the canonical traversal for every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTable {
    pub season: Season,
    pub weeks: BTreeMap<Week, WeekScores>,
}

impl WeeklyTable {
    pub fn new(season: Season) -> Self {
        Self {
            season,
            weeks: BTreeMap::new(),
        }
    }

    pub fn week(&self, week: Week) -> Option<&WeekScores> {
        self.weeks.get(&week)
    }

    /// Every entry, ascending by week, original source order within a week.
    pub fn entries(&self) -> impl Iterator<Item = &WeeklyScoreEntry> + '_ {
        self.weeks.values().flat_map(|scores| scores.iter())
    }

    pub fn roster_ids(&self) -> BTreeSet<RosterId> {
        self.entries().map(|e| e.roster_id).collect()
    }

    pub fn entry_count(&self) -> usize {
        self.weeks.values().map(WeekScores::len).sum()
    }

    /// True when no week holds any entry (the table may still list weeks).
    pub fn is_empty(&self) -> bool {
        self.weeks.values().all(WeekScores::is_empty)
    }
}

/// Mean with a zero guard for empty tallies.
pub(crate) fn average(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}
