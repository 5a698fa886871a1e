//! Configuration management for processors.
//!
//! Supports loading configuration from:
//! 1. YAML documents (file or string)
//! 2. Environment variables (with `QSIM_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! A configuration document carries a `processor` section
//! ([`ProcessorConfig`]) and an optional `backend` section
//! ([`BackendDescriptor`]):
//!
//! ```yaml
//! processor:
//!   num_qubits: 4
//!   error_correction: true
//!   seed: 7
//! backend:
//!   name: statevector
//!   capabilities:
//!     max_qubits: 8
//!     gate_types: [H, X, CNOT]
//!     coherence_time: 100.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::BackendDescriptor;

/// Processor tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Register size; defaults to the backend's `max_qubits`.
    #[serde(default)]
    pub num_qubits: Option<u32>,

    /// Enable the error-correction nudge after noisy gates.
    #[serde(default)]
    pub error_correction: bool,

    /// Per-operation coherence multiplier for operand qubits.
    #[serde(default = "default_decoherence_decay")]
    pub decoherence_decay: f64,

    /// Coherence below which a decoherence event is logged.
    #[serde(default = "default_coherence_alarm")]
    pub coherence_alarm: f64,

    /// Coherence restored by one correction.
    #[serde(default = "default_correction_boost")]
    pub correction_boost: f64,

    /// Error-rate multiplier applied by one correction.
    #[serde(default = "default_correction_error_factor")]
    pub correction_error_factor: f64,

    /// Seed for the measurement RNG; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_decoherence_decay() -> f64 {
    0.99
}

fn default_coherence_alarm() -> f64 {
    0.5
}

fn default_correction_boost() -> f64 {
    0.01
}

fn default_correction_error_factor() -> f64 {
    0.95
}

fn default_backend() -> BackendDescriptor {
    BackendDescriptor::simulator(8)
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            num_qubits: None,
            error_correction: false,
            decoherence_decay: default_decoherence_decay(),
            coherence_alarm: default_coherence_alarm(),
            correction_boost: default_correction_boost(),
            correction_error_factor: default_correction_error_factor(),
            seed: None,
        }
    }
}

impl ProcessorConfig {
    /// Set the register size.
    #[must_use]
    pub fn with_num_qubits(mut self, num_qubits: u32) -> Self {
        self.num_qubits = Some(num_qubits);
        self
    }

    /// Enable or disable error correction.
    #[must_use]
    pub fn with_error_correction(mut self, enabled: bool) -> Self {
        self.error_correction = enabled;
        self
    }

    /// Seed the measurement RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Apply `QSIM_*` environment overrides.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Only variables that are present override the current values.
    pub fn merge_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QSIM_NUM_QUBITS") {
            self.num_qubits = Some(parse_env("QSIM_NUM_QUBITS", &v)?);
        }
        if let Some(v) = lookup("QSIM_ERROR_CORRECTION") {
            self.error_correction = match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "QSIM_ERROR_CORRECTION: expected a boolean, got '{v}'"
                    )));
                }
            };
        }
        if let Some(v) = lookup("QSIM_SEED") {
            self.seed = Some(parse_env("QSIM_SEED", &v)?);
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_qubits == Some(0) {
            return Err(ConfigError::ValidationError(
                "num_qubits must be greater than 0".to_string(),
            ));
        }

        let unit_fields = [
            ("decoherence_decay", self.decoherence_decay),
            ("coherence_alarm", self.coherence_alarm),
            ("correction_boost", self.correction_boost),
            ("correction_error_factor", self.correction_error_factor),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if self.decoherence_decay == 0.0 {
            return Err(ConfigError::ValidationError(
                "decoherence_decay must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}: invalid value '{value}'")))
}

/// A complete configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processor: ProcessorConfig,

    #[serde(default = "default_backend")]
    pub backend: BackendDescriptor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processor: ProcessorConfig::default(),
            backend: default_backend(),
        }
    }
}

impl Config {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    /// 3. Validate
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        config.processor = config.processor.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml_ng::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate both sections and their consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.processor.validate()?;
        self.backend.validate()?;

        if let Some(n) = self.processor.num_qubits {
            if n > self.backend.capabilities.max_qubits {
                return Err(ConfigError::ValidationError(format!(
                    "num_qubits {n} exceeds backend max_qubits {}",
                    self.backend.capabilities.max_qubits
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processor.decoherence_decay, 0.99);
        assert_eq!(config.processor.coherence_alarm, 0.5);
        assert!(!config.processor.error_correction);
        assert_eq!(config.backend.capabilities.max_qubits, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_document() {
        let config = Config::from_yaml_str(
            r"
processor:
  num_qubits: 3
  error_correction: true
",
        )
        .unwrap();
        assert_eq!(config.processor.num_qubits, Some(3));
        assert!(config.processor.error_correction);
        assert_eq!(config.processor.correction_boost, 0.01);
        assert_eq!(config.backend, default_backend());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.processor = config.processor.with_seed(42).with_num_qubits(5);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let processor = ProcessorConfig::default()
            .merge_env_from(env(&[
                ("QSIM_NUM_QUBITS", "6"),
                ("QSIM_ERROR_CORRECTION", "on"),
                ("QSIM_SEED", "99"),
            ]))
            .unwrap();
        assert_eq!(processor.num_qubits, Some(6));
        assert!(processor.error_correction);
        assert_eq!(processor.seed, Some(99));
    }

    #[test]
    fn test_absent_env_keeps_values() {
        let base = ProcessorConfig::default().with_num_qubits(2);
        let merged = base.clone().merge_env_from(env(&[])).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_env_parse_errors() {
        let result = ProcessorConfig::default().merge_env_from(env(&[("QSIM_SEED", "abc")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        let result =
            ProcessorConfig::default().merge_env_from(env(&[("QSIM_ERROR_CORRECTION", "maybe")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut processor = ProcessorConfig::default();
        processor.coherence_alarm = 1.5;
        assert!(processor.validate().is_err());

        let mut processor = ProcessorConfig::default();
        processor.decoherence_decay = 0.0;
        assert!(processor.validate().is_err());

        assert!(ProcessorConfig::default().with_num_qubits(0).validate().is_err());
    }

    #[test]
    fn test_validate_num_qubits_against_backend() {
        let mut config = Config::default();
        config.processor.num_qubits = Some(9);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/qsim.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
