//! Projection row and sort state types

use crate::core::health::HealthCheckResult;
use crate::utils::error::HealthError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One result joined with the component metadata views group and sort by
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthRow {
    #[serde(flatten)]
    pub result: HealthCheckResult,
    /// Owning team's display name
    pub team: Option<String>,
    pub is_library: bool,
    pub central_service: bool,
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    Team,
    Status,
    ResponseTime,
    LastChecked,
}

impl FromStr for SortColumn {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "team" => Ok(Self::Team),
            "status" => Ok(Self::Status),
            "response_time" | "response-time" | "latency" => Ok(Self::ResponseTime),
            "last_checked" | "last-checked" => Ok(Self::LastChecked),
            other => Err(HealthError::validation(format!("unknown sort column: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(HealthError::validation(format!("unknown sort direction: {}", other))),
        }
    }
}

/// Order used when no column sort is active (the dropdown)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOrder {
    #[default]
    Name,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Dropdown order plus an optional column override
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub default_order: DefaultOrder,
    pub column: Option<ColumnSort>,
}

impl SortState {
    pub fn by_column(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            default_order: DefaultOrder::default(),
            column: Some(ColumnSort { column, direction }),
        }
    }

    /// Column header click: ascending, then descending, then back to the
    /// default order. Clicking another column starts it at ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        self.column = match self.column {
            Some(current) if current.column == column => match current.direction {
                SortDirection::Asc => Some(ColumnSort {
                    column,
                    direction: SortDirection::Desc,
                }),
                SortDirection::Desc => None,
            },
            _ => Some(ColumnSort {
                column,
                direction: SortDirection::Asc,
            }),
        };
    }

    /// Dropdown change; an active column sort keeps precedence
    pub fn set_default_order(&mut self, order: DefaultOrder) {
        self.default_order = order;
    }
}

/// Presentation options applied by [`project`](super::project)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub sort: SortState,
    /// Drop non-UP central-service rows when the landscape is not central
    pub hide_central_non_up: bool,
}

/// Rows split by the component library flag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedRows {
    pub services: Vec<HealthRow>,
    pub libraries: Vec<HealthRow>,
}

/// Rows owned by one team; `team == None` collects unowned components
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGroup {
    pub team: Option<String>,
    pub rows: Vec<HealthRow>,
}
