//! Optimization pass orchestration and configuration.
//!
//! A pass is one detect-then-resolve sweep over the full session set,
//! invoked synchronously per request. There is no retry loop: a conflict
//! whose resolution fails stays in the timetable and is rediscovered on
//! the next pass.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{OptimizationReport, OptimizationSummary};
use crate::db::repository::FullRepository;
use crate::services::conflicts::detect_conflicts;
use crate::services::resolver::{resolve_conflicts, OptimizerError, OptimizerResult};
use crate::services::session_locks::SessionLockRegistry;

/// Optimizer configuration: the institution-wide hall pool.
///
/// The pool is order-sensitive — hall reassignment takes the first free
/// hall in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_available_halls")]
    pub available_halls: Vec<String>,
}

fn default_available_halls() -> Vec<String> {
    ["A101", "A102", "A103", "B101", "B102", "B103", "C101", "C102"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            available_halls: default_available_halls(),
        }
    }
}

#[derive(Deserialize)]
struct OptimizerConfigFile {
    optimizer: OptimizerConfig,
}

impl OptimizerConfig {
    /// Load optimizer configuration from a TOML file with an `[optimizer]`
    /// table.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(OptimizerConfig)` if successful
    /// * `Err(OptimizerError::Configuration)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> OptimizerResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            OptimizerError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: OptimizerConfigFile = toml::from_str(&content).map_err(|e| {
            OptimizerError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config.optimizer)
    }

    /// Load optimizer configuration from the environment, falling back to a
    /// config file, falling back to defaults.
    ///
    /// `STO_AVAILABLE_HALLS` is a comma-separated hall list; when unset,
    /// `optimizer.toml` is searched in the current and parent directory.
    pub fn from_env() -> Self {
        if let Ok(halls) = std::env::var("STO_AVAILABLE_HALLS") {
            let pool: Vec<String> = halls
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect();
            if !pool.is_empty() {
                return Self {
                    available_halls: pool,
                };
            }
        }

        for path in [
            PathBuf::from("optimizer.toml"),
            PathBuf::from("../optimizer.toml"),
        ] {
            if path.exists() {
                if let Ok(config) = Self::from_file(&path) {
                    return config;
                }
            }
        }

        Self::default()
    }
}

/// Run one full optimization pass: detect every conflict, attempt one
/// resolution per conflict, and tally the outcomes.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `locks` - Per-session lock registry shared across concurrent passes
/// * `config` - Hall pool configuration
///
/// # Returns
/// * `Ok(OptimizationReport)` - Conflicts found, outcomes, and the summary
/// * `Err(OptimizerError)` - If a store operation fails mid-pass
pub async fn run_optimization_pass<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &SessionLockRegistry,
    config: &OptimizerConfig,
) -> OptimizerResult<OptimizationReport> {
    let conflicts = detect_conflicts(repo).await?;
    if conflicts.is_empty() {
        return Ok(OptimizationReport::no_conflicts());
    }

    let resolutions = resolve_conflicts(repo, locks, config, &conflicts).await?;

    let resolved = resolutions.iter().filter(|r| r.success).count();
    let summary = OptimizationSummary {
        total_conflicts: conflicts.len(),
        resolved,
        pending: resolutions.len() - resolved,
    };

    Ok(OptimizationReport {
        message: "Timetable optimization completed".to_string(),
        conflicts_detected: conflicts.len(),
        conflicts,
        resolutions,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hall_pool() {
        let config = OptimizerConfig::default();
        assert_eq!(config.available_halls.len(), 8);
        assert_eq!(config.available_halls[0], "A101");
        assert_eq!(config.available_halls[7], "C102");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
[optimizer]
available_halls = ["H1", "H2"]
"#;
        let parsed: OptimizerConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(parsed.optimizer.available_halls, vec!["H1", "H2"]);
    }

    #[test]
    fn test_config_missing_file() {
        let result = OptimizerConfig::from_file("/nonexistent/optimizer.toml");
        assert!(matches!(result, Err(OptimizerError::Configuration(_))));
    }
}
