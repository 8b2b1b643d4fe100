//! Summary aggregation

use super::types::{HealthCheckResult, HealthStatus, HealthSummary};

/// Reduce a result set to summary counters.
///
/// `down` and `error` are separate buckets. `OUT_OF_SERVICE` and `LOADING`
/// results count toward `total` only.
pub fn summarize(results: &[HealthCheckResult]) -> HealthSummary {
    let mut summary = HealthSummary {
        total: results.len(),
        ..Default::default()
    };

    let mut timed = 0u64;
    let mut total_time = 0u64;

    for result in results {
        match result.status {
            HealthStatus::Up => summary.up += 1,
            HealthStatus::Down => summary.down += 1,
            HealthStatus::Unknown => summary.unknown += 1,
            HealthStatus::Error => summary.error += 1,
            HealthStatus::OutOfService | HealthStatus::Loading => {}
        }

        if let Some(response_time) = result.response_time {
            timed += 1;
            total_time += response_time;
        }
    }

    if timed > 0 {
        summary.avg_response_time = (total_time as f64 / timed as f64).round() as u64;
    }

    summary
}

impl HealthSummary {
    /// Share of `UP` results, in percent
    pub fn up_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.up as f64 / self.total as f64) * 100.0
    }

    /// Whether every result is `UP`
    pub fn all_up(&self) -> bool {
        self.total > 0 && self.up == self.total
    }
}
