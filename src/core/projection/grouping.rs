//! Grouping and display filters

use super::sorting::sort_rows;
use super::types::{GroupedRows, HealthRow, TeamGroup, ViewOptions};
use crate::core::health::HealthStatus;
use std::collections::BTreeMap;

/// Split rows by the library flag, keeping their order
pub fn group_by_library(rows: Vec<HealthRow>) -> GroupedRows {
    let (libraries, services): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| row.is_library);
    GroupedRows {
        services,
        libraries,
    }
}

/// Group rows by team name (alphabetical), unowned rows last.
/// Row order inside each group is preserved.
pub fn group_by_team(rows: Vec<HealthRow>) -> Vec<TeamGroup> {
    let mut teams: BTreeMap<String, Vec<HealthRow>> = BTreeMap::new();
    let mut unowned = Vec::new();

    for row in rows {
        match &row.team {
            Some(team) => teams.entry(team.clone()).or_default().push(row),
            None => unowned.push(row),
        }
    }

    let mut groups: Vec<TeamGroup> = teams
        .into_iter()
        .map(|(team, rows)| TeamGroup {
            team: Some(team),
            rows,
        })
        .collect();
    if !unowned.is_empty() {
        groups.push(TeamGroup {
            team: None,
            rows: unowned,
        });
    }
    groups
}

/// Drop non-UP rows of central services unless the viewed landscape is central.
///
/// `is_central` is the effective flag, see [`PollOptions::is_central`].
///
/// [`PollOptions::is_central`]: crate::core::poller::PollOptions::is_central
pub fn hide_central_non_up(rows: Vec<HealthRow>, is_central: bool) -> Vec<HealthRow> {
    if is_central {
        return rows;
    }
    rows.into_iter()
        .filter(|row| !row.central_service || row.result.status == HealthStatus::Up)
        .collect()
}

/// Filter, sort, then split by library flag
pub fn project(mut rows: Vec<HealthRow>, is_central: bool, options: &ViewOptions) -> GroupedRows {
    if options.hide_central_non_up {
        rows = hide_central_non_up(rows, is_central);
    }
    sort_rows(&mut rows, &options.sort);
    group_by_library(rows)
}
