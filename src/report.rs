//! Report generation.
//!
//! Joins entered values with catalog parameters and the patient record.
//! Row statuses are derived here on every build and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::ParameterCatalog;
use crate::classifier::classify;
use crate::config::MAX_REPORT_ENTRIES;
use crate::models::{MeasurementValue, Patient, PresentationTag, ResultStatus};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown test or package: {0}")]
    UnknownTest(String),

    #[error("Report request has no entries")]
    NoEntries,
}

/// A value typed into the report-entry form for one parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub parameter: String,
    pub value: MeasurementValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub patient: Patient,
    pub test_name: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub normal_range: String,
    pub status: ResultStatus,
    pub tag: PresentationTag,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub normal: usize,
    pub high: usize,
    pub low: usize,
    pub undetermined: usize,
    pub has_abnormal: bool,
}

impl ReportSummary {
    fn from_rows(rows: &[ReportRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.status {
                ResultStatus::Normal => summary.normal += 1,
                ResultStatus::High => summary.high += 1,
                ResultStatus::Low => summary.low += 1,
                ResultStatus::Undetermined => summary.undetermined += 1,
            }
        }
        summary.has_abnormal = summary.high + summary.low > 0;
        summary
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub patient: Patient,
    pub test_name: String,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    pub warnings: Vec<String>,
}

/// Build a report for one booking.
///
/// Unknown parameters still produce a row (status `Unable to determine`)
/// and a warning, so the report shows everything that was entered.
pub fn build_report(
    catalog: &ParameterCatalog,
    request: &ReportRequest,
) -> Result<Report, ReportError> {
    let test = catalog
        .test(&request.test_name)
        .ok_or_else(|| ReportError::UnknownTest(request.test_name.clone()))?;
    if request.entries.is_empty() {
        return Err(ReportError::NoEntries);
    }

    let mut warnings = Vec::new();
    let mut entries = request.entries.as_slice();
    if entries.len() > MAX_REPORT_ENTRIES {
        warnings.push(format!(
            "Excessive entries ({}) capped to {MAX_REPORT_ENTRIES}",
            entries.len()
        ));
        entries = &entries[..MAX_REPORT_ENTRIES];
    }

    let patient = request.patient.context();
    if request.patient.gender.is_some() && patient.gender.is_none() {
        warnings.push(format!(
            "Patient gender '{}' does not select gender-specific ranges",
            request.patient.gender.as_deref().unwrap_or_default()
        ));
    }

    let rows: Vec<ReportRow> = entries
        .iter()
        .map(|entry| {
            let Some(param) = test.parameter(&entry.parameter) else {
                warnings.push(format!(
                    "Parameter '{}' is not defined for {}",
                    entry.parameter, test.name
                ));
                return ReportRow {
                    parameter: entry.parameter.clone(),
                    value: entry.value.display(),
                    unit: String::new(),
                    normal_range: String::new(),
                    status: ResultStatus::Undetermined,
                    tag: PresentationTag::Unknown,
                };
            };

            let status = classify(&entry.value, &param.normal_range, patient.age, patient.gender);
            ReportRow {
                parameter: param.name.clone(),
                value: entry.value.display(),
                unit: param.unit.clone(),
                normal_range: param.normal_range.clone(),
                status,
                tag: status.presentation_tag(),
            }
        })
        .collect();

    let summary = ReportSummary::from_rows(&rows);

    if !warnings.is_empty() {
        tracing::warn!(
            test = %test.name,
            warning_count = warnings.len(),
            "Report built with warnings"
        );
    }
    tracing::debug!(
        test = %test.name,
        rows = rows.len(),
        abnormal = summary.has_abnormal,
        "Report built"
    );

    Ok(Report {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        patient: request.patient.clone(),
        test_name: test.name.clone(),
        rows,
        summary,
        warnings,
    })
}
