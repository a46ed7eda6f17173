// Error types surfaced by the statistics engine.

use thiserror::Error;

use crate::model::{RosterId, Season, Week};

/// A raw record that cannot be turned into a weekly score entry.
///
/// Missing owners and empty weeks are not errors; they are recovered at the
/// point they are found. Only structurally broken matchup records end up here,
/// and each one fails the season it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("season {season}: week numbers start at 1, got week 0")]
    InvalidWeek { season: Season },

    #[error("season {season} week {week}: matchup record #{index} has no roster_id")]
    MissingRosterId {
        season: Season,
        week: Week,
        index: usize,
    },

    #[error("season {season} week {week}: roster {roster_id} has non-finite points ({points})")]
    NonFinitePoints {
        season: Season,
        week: Week,
        roster_id: RosterId,
        points: f64,
    },

    #[error("season {season} week {week}: roster {roster_id} has negative points ({points})")]
    NegativePoints {
        season: Season,
        week: Week,
        roster_id: RosterId,
        points: f64,
    },

    #[error("season {season} week {week}: duplicate matchup record for roster {roster_id}")]
    DuplicateEntry {
        season: Season,
        week: Week,
        roster_id: RosterId,
    },
}
