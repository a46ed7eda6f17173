// Raw record shapes as delivered by the league data source.
//
// These mirror the Sleeper JSON payloads for users, rosters and weekly
// matchups. Optional fields stay optional here; defaults are applied during
// identity resolution and normalization, never in the aggregation code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{RosterId, Season, Week};

/// A league member account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub metadata: Option<RawUserMetadata>,
}

/// Free-form per-user league metadata. Only the team name is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// A roster slot in the league. `owner_id` is null for orphaned rosters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRoster {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// One roster's line in a week's matchup listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchup {
    #[serde(default)]
    pub roster_id: Option<RosterId>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

/// Everything fetched for one season, ready for analysis.
///
/// `weeks` only contains weeks that were actually fetched. A week mapped to
/// an empty list was fetched and had no matchups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonInput {
    pub season: Season,
    pub users: Vec<RawUser>,
    pub rosters: Vec<RawRoster>,
    pub weeks: BTreeMap<Week, Vec<RawMatchup>>,
}
