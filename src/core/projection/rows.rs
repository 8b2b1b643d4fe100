//! Joining results with registry metadata

use super::types::HealthRow;
use crate::core::health::{HealthCheckResult, partition_components};
use crate::core::registry::{Component, Landscape};
use std::collections::HashMap;

/// Join `results` with their components.
///
/// Results whose component is unknown are dropped. With `include_unsupported`,
/// every health-enabled component that the eligibility filter excluded gets an
/// `UNKNOWN` "not supported in this landscape" row.
pub fn materialize_rows(
    components: &[Component],
    results: &[HealthCheckResult],
    landscape: &Landscape,
    central_landscape_exists: bool,
    team_names: &HashMap<String, String>,
    include_unsupported: bool,
) -> Vec<HealthRow> {
    let by_id: HashMap<&str, &Component> =
        components.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut rows: Vec<HealthRow> = results
        .iter()
        .filter_map(|result| {
            let component = by_id.get(result.component_id.as_str())?;
            Some(row(component, result.clone(), team_names))
        })
        .collect();

    if include_unsupported {
        let (_, ineligible) =
            partition_components(components, landscape, central_landscape_exists);
        rows.extend(
            ineligible
                .into_iter()
                .filter(|c| c.health_enabled)
                .map(|c| row(c, HealthCheckResult::unsupported(c, landscape), team_names)),
        );
    }

    rows
}

fn row(
    component: &Component,
    result: HealthCheckResult,
    team_names: &HashMap<String, String>,
) -> HealthRow {
    HealthRow {
        result,
        team: component
            .owner
            .as_ref()
            .and_then(|owner| team_names.get(owner).cloned()),
        is_library: component.is_library,
        central_service: component.central_service,
    }
}
