//! View projection
//!
//! Presentation-only transforms over a result set: joining with registry
//! metadata, placeholder rows, sorting, grouping and display filters. Nothing
//! here feeds back into the poller or the cache.

pub mod grouping;
pub mod rows;
pub mod sorting;
pub mod types;

pub use grouping::{group_by_library, group_by_team, hide_central_non_up, project};
pub use rows::materialize_rows;
pub use sorting::sort_rows;
pub use types::{
    ColumnSort, DefaultOrder, GroupedRows, HealthRow, SortColumn, SortDirection, SortState,
    TeamGroup, ViewOptions,
};
