//! Custom test assertions

use landscape_health::{HealthCheckResult, HealthSummary};
use std::collections::HashSet;

/// Invariants every result set and its summary must satisfy
pub fn assert_summary_consistent(results: &[HealthCheckResult], summary: &HealthSummary) {
    assert_eq!(summary.total, results.len(), "summary.total must equal result count");
    assert!(
        summary.up + summary.down + summary.unknown + summary.error <= summary.total,
        "status buckets overlap: {:?}",
        summary
    );
}

/// Exactly one result per component id
pub fn assert_unique_components(results: &[HealthCheckResult]) {
    let mut seen = HashSet::new();
    for result in results {
        assert!(
            seen.insert(result.component_id.as_str()),
            "component {} appears twice",
            result.component_id
        );
    }
}
