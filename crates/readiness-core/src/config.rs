use crate::error::{ReadinessError, Result};
use crate::types::Status;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// WeightTable
// ---------------------------------------------------------------------------

/// Status → completion weight used by the readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    #[serde(default = "default_not_started")]
    pub not_started: f64,
    #[serde(default = "default_in_progress")]
    pub in_progress: f64,
    #[serde(default = "default_partially_compliant")]
    pub partially_compliant: f64,
    #[serde(default = "default_compliant")]
    pub compliant: f64,
    #[serde(default = "default_full")]
    pub verified: f64,
    #[serde(default = "default_full")]
    pub not_applicable: f64,
}

fn default_not_started() -> f64 {
    0.0
}

fn default_in_progress() -> f64 {
    0.3
}

fn default_partially_compliant() -> f64 {
    0.6
}

fn default_compliant() -> f64 {
    0.9
}

fn default_full() -> f64 {
    1.0
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            not_started: default_not_started(),
            in_progress: default_in_progress(),
            partially_compliant: default_partially_compliant(),
            compliant: default_compliant(),
            verified: default_full(),
            not_applicable: default_full(),
        }
    }
}

impl WeightTable {
    pub fn weight(&self, status: Status) -> f64 {
        match status {
            Status::NotStarted => self.not_started,
            Status::InProgress => self.in_progress,
            Status::PartiallyCompliant => self.partially_compliant,
            Status::Compliant => self.compliant,
            Status::Verified => self.verified,
            Status::NotApplicable => self.not_applicable,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for status in Status::all() {
            let w = self.weight(*status);
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(ReadinessError::InvalidConfig(format!(
                    "weight for {status} must be within [0, 1], got {w}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReadinessConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessConfig {
    #[serde(default)]
    pub weights: WeightTable,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: f64,
    /// Days after the as-of date within which a mitigated blocking gap still
    /// counts as near ready.
    #[serde(default = "default_horizon_days")]
    pub near_ready_horizon_days: u32,
    /// Whether VERIFIED requirements land in the per-category compliant bucket.
    #[serde(default = "default_verified_counts")]
    pub verified_counts_as_compliant: bool,
}

fn default_hours_per_week() -> f64 {
    40.0
}

fn default_horizon_days() -> u32 {
    30
}

fn default_verified_counts() -> bool {
    true
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            hours_per_week: default_hours_per_week(),
            near_ready_horizon_days: default_horizon_days(),
            verified_counts_as_compliant: default_verified_counts(),
        }
    }
}

impl ReadinessConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReadinessError::InputNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path).map_err(|source| ReadinessError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ReadinessConfig = serde_yaml::from_str(&data)
            .map_err(|e| ReadinessError::InvalidConfig(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !self.hours_per_week.is_finite() || self.hours_per_week <= 0.0 {
            return Err(ReadinessError::InvalidConfig(format!(
                "hours_per_week must be positive, got {}",
                self.hours_per_week
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
