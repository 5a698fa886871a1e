//! Measurement and physical-event records.
//!
//! Both logs are append-only. Physical-simulation events (decoherence,
//! error-correction interventions) are recorded here and never surface as
//! errors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use qsim_ir::QubitId;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// Basis a qubit is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementBasis {
    /// Z basis, no basis change.
    Computational,
    /// X basis, preceded by H.
    Hadamard,
    /// Y basis, preceded by H·S†.
    Phase,
}

impl MeasurementBasis {
    pub fn name(self) -> &'static str {
        match self {
            MeasurementBasis::Computational => "computational",
            MeasurementBasis::Hadamard => "hadamard",
            MeasurementBasis::Phase => "phase",
        }
    }
}

impl fmt::Display for MeasurementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeasurementBasis {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "computational" => Ok(MeasurementBasis::Computational),
            "hadamard" => Ok(MeasurementBasis::Hadamard),
            "phase" => Ok(MeasurementBasis::Phase),
            other => Err(RuntimeError::MeasurementBasisError(other.to_string())),
        }
    }
}

/// One single-qubit measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub qubit: QubitId,
    pub basis: MeasurementBasis,
    /// Outcome, 0 or 1.
    pub result: u8,
    pub timestamp: DateTime<Utc>,
    /// Processor error rate when the measurement was taken.
    pub error_rate: f64,
}

/// Category of a physical-simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Gate,
    Measurement,
    Decoherence,
    Initialization,
}

/// How serious an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A logged physical-simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumErrorRecord {
    pub kind: ErrorKind,
    /// Affected qubit, `None` for register-wide events.
    pub qubit: Option<QubitId>,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

impl QuantumErrorRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        kind: ErrorKind,
        qubit: Option<QubitId>,
        severity: Severity,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            qubit,
            severity,
            timestamp: Utc::now(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basis() {
        assert_eq!(
            "computational".parse::<MeasurementBasis>().unwrap(),
            MeasurementBasis::Computational
        );
        assert_eq!(
            "phase".parse::<MeasurementBasis>().unwrap(),
            MeasurementBasis::Phase
        );
        assert!(matches!(
            "diagonal".parse::<MeasurementBasis>(),
            Err(RuntimeError::MeasurementBasisError(name)) if name == "diagonal"
        ));
    }

    #[test]
    fn test_basis_display_round_trips() {
        for basis in [
            MeasurementBasis::Computational,
            MeasurementBasis::Hadamard,
            MeasurementBasis::Phase,
        ] {
            assert_eq!(basis.to_string().parse::<MeasurementBasis>().unwrap(), basis);
        }
    }

    #[test]
    fn test_record_serializes_lowercase() {
        let record =
            QuantumErrorRecord::new(ErrorKind::Decoherence, Some(QubitId(2)), Severity::High, "t2");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "decoherence");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["qubit"], 2);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }
}
