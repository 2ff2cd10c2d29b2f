//! Configuration for the comparator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings controlling table comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Number of randomly sampled rows compared per table
    pub n_sample_rows: usize,
    /// Relative tolerance for numeric cell comparison
    pub rel_tol: f64,
    /// Absolute tolerance floor for numeric cell comparison
    pub abs_tol: f64,
    /// Fixed seed for row sampling; sampled from the OS when unset
    pub seed: Option<u64>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            n_sample_rows: 10,
            rel_tol: 1e-6,
            abs_tol: 0.0,
            seed: None,
        }
    }
}

impl CompareConfig {
    /// Load settings from a JSON file. Fields absent from the file keep
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no comparison can run with.
    pub fn validate(&self) -> Result<()> {
        if self.n_sample_rows == 0 {
            return Err(Error::Config("n_sample_rows must be at least 1".into()));
        }
        if !self.rel_tol.is_finite() || self.rel_tol < 0.0 {
            return Err(Error::Config(
                "rel_tol must be finite and non-negative".into(),
            ));
        }
        if !self.abs_tol.is_finite() || self.abs_tol < 0.0 {
            return Err(Error::Config(
                "abs_tol must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = CompareConfig::default();
        assert_eq!(config.n_sample_rows, 10);
        assert_eq!(config.rel_tol, 1e-6);
        assert_eq!(config.abs_tol, 0.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        let config = CompareConfig {
            n_sample_rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = CompareConfig {
            rel_tol: -1e-6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: CompareConfig = serde_json::from_str(r#"{"rel_tol": 1e-3}"#).unwrap();
        assert_eq!(config.rel_tol, 1e-3);
        assert_eq!(config.n_sample_rows, 10);
    }
}
