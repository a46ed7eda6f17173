// Roster id → team/owner identity resolution.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{IdentityMap, RosterIdentity, RosterId, UNKNOWN_OWNER, UNKNOWN_USERNAME};
use crate::raw::{RawRoster, RawUser};

/// Map every roster to the team and owner behind it.
///
/// A roster whose `owner_id` is missing or does not match any user gets the
/// placeholder identity. That is the normal state for orphaned rosters, so it
/// is logged at debug level rather than reported.
pub fn resolve_identities(users: &[RawUser], rosters: &[RawRoster]) -> IdentityMap {
    let users_by_id: HashMap<&str, &RawUser> =
        users.iter().map(|u| (u.user_id.as_str(), u)).collect();

    let mut identities = IdentityMap::new();
    for roster in rosters {
        let owner = roster
            .owner_id
            .as_deref()
            .and_then(|owner_id| users_by_id.get(owner_id));

        let identity = match owner {
            Some(user) => identity_for_user(roster.roster_id, user),
            None => {
                debug!(
                    "roster {} has no resolvable owner ({:?}), using placeholder",
                    roster.roster_id, roster.owner_id
                );
                RosterIdentity::placeholder(roster.roster_id)
            }
        };

        if identities.insert(roster.roster_id, identity).is_some() {
            warn!("duplicate roster id {} in roster list, using latest", roster.roster_id);
        }
    }
    identities
}

fn identity_for_user(roster_id: RosterId, user: &RawUser) -> RosterIdentity {
    let username = non_blank(user.username.as_deref());
    let owner_name = non_blank(user.display_name.as_deref())
        .or(username)
        .unwrap_or(UNKNOWN_OWNER)
        .to_string();
    let team_name = user
        .metadata
        .as_ref()
        .and_then(|m| non_blank(m.team_name.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| owner_name.clone());

    RosterIdentity {
        roster_id,
        team_name,
        owner_name,
        username: username.unwrap_or(UNKNOWN_USERNAME).to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
