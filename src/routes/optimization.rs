use serde::{Deserialize, Serialize};

use crate::routes::conflicts::Conflict;
use crate::routes::resolutions::ResolutionOutcome;

/// Tally over the resolution outcomes of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub total_conflicts: usize,
    /// Outcomes with status success.
    pub resolved: usize,
    /// Outcomes left for a later pass or manual review.
    pub pending: usize,
}

/// Aggregate result of one detect-then-resolve pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub message: String,
    pub conflicts_detected: usize,
    pub conflicts: Vec<Conflict>,
    pub resolutions: Vec<ResolutionOutcome>,
    pub summary: OptimizationSummary,
}

impl OptimizationReport {
    /// Report for a pass that found nothing to repair.
    pub fn no_conflicts() -> Self {
        Self {
            message: "No conflicts detected".to_string(),
            conflicts_detected: 0,
            conflicts: vec![],
            resolutions: vec![],
            summary: OptimizationSummary {
                total_conflicts: 0,
                resolved: 0,
                pending: 0,
            },
        }
    }
}

/// Optimization route function name constant
pub const RUN_OPTIMIZATION_PASS: &str = "run_optimization_pass";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts_report() {
        let report = OptimizationReport::no_conflicts();
        assert_eq!(report.conflicts_detected, 0);
        assert_eq!(report.summary.total_conflicts, 0);
        assert!(report.conflicts.is_empty());
        assert!(report.resolutions.is_empty());
    }

    #[test]
    fn test_report_serde_shape() {
        let report = OptimizationReport::no_conflicts();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["message"], "No conflicts detected");
        assert_eq!(json["summary"]["resolved"], 0);
    }
}
