//! Test and package parameter catalog.
//!
//! Supplies the `unit` and `normal_range` strings for every named parameter.
//! Loaded from JSON:
//!
//! ```json
//! { "tests": [ { "name": "Complete Blood Count", "kind": "test",
//!   "parameters": [ { "name": "Hemoglobin", "unit": "g/dL",
//!                     "normal_range": "Male: 13.5-17.5, Female: 12-15.5" } ] } ] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::RangeSpec;
use crate::models::Parameter;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate test in catalog: {0}")]
    DuplicateTest(String),

    #[error("Duplicate parameter {parameter} in test {test}")]
    DuplicateParameter { test: String, parameter: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingKind {
    #[default]
    Test,
    Package,
}

/// A bookable test or health package and the parameters it reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub kind: OfferingKind,
    pub parameters: Vec<Parameter>,
}

impl CatalogEntry {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        let lower = name.trim().to_lowercase();
        self.parameters
            .iter()
            .find(|p| p.name.trim().to_lowercase() == lower)
    }

    /// One warning per parameter whose normal range no patient could be
    /// classified against.
    #[must_use]
    pub fn range_warnings(&self) -> Vec<String> {
        self.parameters
            .iter()
            .filter(|p| !RangeSpec::parse(&p.normal_range).is_recognized())
            .map(|p| {
                format!(
                    "{} / {}: unrecognized normal range '{}'",
                    self.name, p.name, p.normal_range
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterCatalog {
    pub tests: Vec<CatalogEntry>,
}

impl ParameterCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check_unique()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Load {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            tests = catalog.tests.len(),
            "Parameter catalog loaded"
        );
        Ok(catalog)
    }

    /// Names compare case-insensitively.
    fn check_unique(&self) -> Result<(), CatalogError> {
        let mut tests = HashSet::new();
        for entry in &self.tests {
            if !tests.insert(entry.name.trim().to_lowercase()) {
                return Err(CatalogError::DuplicateTest(entry.name.clone()));
            }
            let mut params = HashSet::new();
            for param in &entry.parameters {
                if !params.insert(param.name.trim().to_lowercase()) {
                    return Err(CatalogError::DuplicateParameter {
                        test: entry.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn test(&self, name: &str) -> Option<&CatalogEntry> {
        let lower = name.trim().to_lowercase();
        self.tests
            .iter()
            .find(|t| t.name.trim().to_lowercase() == lower)
    }

    pub fn lookup(&self, test: &str, parameter: &str) -> Option<&Parameter> {
        self.test(test)?.parameter(parameter)
    }

    /// Range warnings across every test. Each one is logged. Never fails.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let warnings: Vec<String> = self
            .tests
            .iter()
            .flat_map(CatalogEntry::range_warnings)
            .collect();

        for warning in &warnings {
            tracing::warn!(%warning, "Unrecognized normal range in catalog");
        }
        warnings
    }
}
