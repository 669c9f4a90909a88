//! Analyzer configuration via TOML files.
//!
//! Missing sections and keys fall back to defaults; only malformed
//! values are errors.

use std::fs;
use std::path::Path;

use serde::Serialize;
use toml::Value;

use crate::spectrum::{SweepConfig, SweepMode};
use crate::state::STATEVECTOR_BACKEND;

/// Top-level configuration.
///
/// ```
/// use hilbert_lens::config::LensConfig;
///
/// let config = LensConfig::from_str(
///     "[sweep]\nn_samples = 256\nmode = \"global\"",
/// ).unwrap();
/// assert_eq!(config.sweep.n_samples, 256);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct LensConfig {
    pub sweep: SweepConfig,
    /// Simulation backend name; only `statevector` is compiled in.
    pub backend: String,
}

impl LensConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let value: Value =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let sweep_table = value
            .get("sweep")
            .and_then(|v| v.as_table())
            .cloned()
            .unwrap_or_default();

        let defaults = SweepConfig::default();

        let n_samples = sweep_table
            .get("n_samples")
            .map(|v| {
                v.as_integer()
                    .filter(|&n| n >= 2)
                    .map(|n| n as usize)
                    .ok_or_else(|| ConfigError::Parse("n_samples must be an integer >= 2".into()))
            })
            .transpose()?
            .unwrap_or(defaults.n_samples);

        let interval_end = sweep_table
            .get("interval_end")
            .map(|v| {
                as_float(v)
                    .filter(|&end| end > 0.0)
                    .ok_or_else(|| {
                        ConfigError::Parse("interval_end must be a positive number".into())
                    })
            })
            .transpose()?
            .unwrap_or(defaults.interval_end);

        let feature_index = sweep_table
            .get("feature_index")
            .map(|v| {
                v.as_integer()
                    .filter(|&i| i >= 0)
                    .map(|i| i as usize)
                    .ok_or_else(|| {
                        ConfigError::Parse("feature_index must be a non-negative integer".into())
                    })
            })
            .transpose()?
            .unwrap_or(0);

        let mode = sweep_table
            .get("mode")
            .map(|v| match v.as_str() {
                Some("single") => Ok(SweepMode::Single { feature_index }),
                Some("global") => Ok(SweepMode::Global),
                _ => Err(ConfigError::Parse(
                    "mode must be \"single\" or \"global\"".into(),
                )),
            })
            .transpose()?
            .unwrap_or(SweepMode::Single { feature_index });

        let backend = value
            .get("engine")
            .and_then(|v| v.get("backend"))
            .and_then(|v| v.as_str())
            .unwrap_or(STATEVECTOR_BACKEND)
            .to_string();

        Ok(Self {
            sweep: SweepConfig {
                n_samples,
                interval_end,
                mode,
            },
            backend,
        })
    }
}

fn as_float(value: &Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|n| n as f64))
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            sweep: SweepConfig::default(),
            backend: STATEVECTOR_BACKEND.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn defaults_when_sections_missing() {
        let config = LensConfig::from_str("").unwrap();
        assert_eq!(config.sweep.n_samples, 1000);
        assert!((config.sweep.interval_end - TAU).abs() < 1e-12);
        assert_eq!(config.sweep.mode, SweepMode::Single { feature_index: 0 });
        assert_eq!(config.backend, STATEVECTOR_BACKEND);
    }

    #[test]
    fn parses_custom_values() {
        let toml = "[sweep]\nn_samples = 512\ninterval_end = 12.56\nmode = \"single\"\nfeature_index = 3\n\n[engine]\nbackend = \"gpu\"";
        let config = LensConfig::from_str(toml).unwrap();
        assert_eq!(config.sweep.n_samples, 512);
        assert!((config.sweep.interval_end - 12.56).abs() < 1e-12);
        assert_eq!(config.sweep.mode, SweepMode::Single { feature_index: 3 });
        assert_eq!(config.backend, "gpu");
    }

    #[test]
    fn integer_interval_end_is_accepted() {
        let config = LensConfig::from_str("[sweep]\ninterval_end = 7").unwrap();
        assert!((config.sweep.interval_end - 7.0).abs() < 1e-12);
    }

    #[test]
    fn global_mode_ignores_feature_index() {
        let config = LensConfig::from_str("[sweep]\nmode = \"global\"\nfeature_index = 9").unwrap();
        assert_eq!(config.sweep.mode, SweepMode::Global);
    }

    #[test]
    fn rejects_bad_mode() {
        let result = LensConfig::from_str("[sweep]\nmode = \"diagonal\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_undersized_n_samples() {
        let result = LensConfig::from_str("[sweep]\nn_samples = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
