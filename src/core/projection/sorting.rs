//! Row ordering
//!
//! Ties always fall back to component name, then id, so every order is total.

use super::types::{ColumnSort, DefaultOrder, HealthRow, SortColumn, SortDirection, SortState};
use std::cmp::Ordering;

/// Sort rows in place according to `state`
pub fn sort_rows(rows: &mut [HealthRow], state: &SortState) {
    match state.column {
        Some(sort) => rows.sort_by(|a, b| compare_column(a, b, sort)),
        None => rows.sort_by(|a, b| compare_default(a, b, state.default_order)),
    }
}

fn compare_default(a: &HealthRow, b: &HealthRow, order: DefaultOrder) -> Ordering {
    match order {
        DefaultOrder::Name => by_name(a, b),
        DefaultOrder::Team => by_team(a, b).then_with(|| by_name(a, b)),
    }
}

fn compare_column(a: &HealthRow, b: &HealthRow, sort: ColumnSort) -> Ordering {
    let primary = match sort.column {
        SortColumn::Name => by_name(a, b),
        SortColumn::Team => by_team(a, b),
        SortColumn::Status => a
            .result
            .status
            .sort_priority()
            .cmp(&b.result.status.sort_priority()),
        SortColumn::ResponseTime => {
            return missing_last(a.result.response_time, b.result.response_time, sort.direction)
                .then_with(|| by_name(a, b));
        }
        SortColumn::LastChecked => {
            return missing_last(a.result.last_checked, b.result.last_checked, sort.direction)
                .then_with(|| by_name(a, b));
        }
    };

    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| by_name(a, b))
}

/// Present values ordered by direction, absent values after them either way
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_name(a: &HealthRow, b: &HealthRow) -> Ordering {
    a.result
        .component_name
        .to_lowercase()
        .cmp(&b.result.component_name.to_lowercase())
        .then_with(|| a.result.component_id.cmp(&b.result.component_id))
}

/// Unowned rows sort after every team
fn by_team(a: &HealthRow, b: &HealthRow) -> Ordering {
    match (&a.team, &b.team) {
        (Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
