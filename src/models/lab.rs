use serde::{Deserialize, Serialize};

use super::enums::ResultStatus;
use crate::classifier;

/// Raw measurement value as typed into a report form or stored as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Text(String),
}

impl MeasurementValue {
    /// Coerce to a number. Empty or non-numeric text and NaN yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(*n),
            Self::Text(text) => classifier::parse_number(text),
        }
    }

    /// Text shown in report rows.
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(text) => text.trim().to_string(),
        }
    }
}

impl From<f64> for MeasurementValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for MeasurementValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for MeasurementValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MeasurementValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&MeasurementValue> for MeasurementValue {
    fn from(value: &MeasurementValue) -> Self {
        value.clone()
    }
}

/// A named measurable quantity within a test or package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub normal_range: String,
}

/// One reported value for one parameter. The status is derived on demand
/// and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub value: MeasurementValue,
    #[serde(default)]
    pub unit: String,
    pub normal_range: String,
}

impl Measurement {
    pub fn new(value: impl Into<MeasurementValue>, parameter: &Parameter) -> Self {
        Self {
            value: value.into(),
            unit: parameter.unit.clone(),
            normal_range: parameter.normal_range.clone(),
        }
    }

    pub fn status(&self, patient: &super::PatientContext) -> ResultStatus {
        classifier::classify(&self.value, &self.normal_range, patient.age, patient.gender)
    }
}
