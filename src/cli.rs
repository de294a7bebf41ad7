//! Command-line front end for classifying results and building reports.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::catalog::{CatalogError, ParameterCatalog};
use crate::classifier::{classify, RangeSpec};
use crate::models::{Gender, MeasurementValue};
use crate::report::{build_report, ReportError, ReportRequest};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to read report request: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed report request: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "labstatus")]
#[command(about = "Classify lab results against free-text normal ranges")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one value against a normal range
    Classify {
        /// Result value as entered
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Normal range, e.g. "5-15" or "Male: 4.5-5.9, Female: 4.1-5.5"
        #[arg(allow_hyphen_values = true)]
        range: String,
        /// Patient age in years
        #[arg(long)]
        age: Option<u32>,
        /// Patient gender ("Male" or "Female")
        #[arg(long)]
        gender: Option<String>,
    },
    /// Show how a normal-range string is interpreted
    CheckRange {
        #[arg(allow_hyphen_values = true)]
        range: String,
    },
    /// Build a report from a catalog and a report request
    Report {
        /// Parameter catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,
        /// Report request JSON file (reads from stdin if not provided)
        #[arg(short, long)]
        request: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Execute a parsed command and return what should be printed on stdout.
pub fn execute(command: Commands) -> Result<String, CliError> {
    match command {
        Commands::Classify {
            value,
            range,
            age,
            gender,
        } => Ok(handle_classify(value, &range, age, gender.as_deref())),
        Commands::CheckRange { range } => handle_check_range(&range),
        Commands::Report {
            catalog,
            request,
            pretty,
        } => handle_report(&catalog, request.as_deref(), pretty),
    }
}

fn handle_classify(value: String, range: &str, age: Option<u32>, gender: Option<&str>) -> String {
    let resolved = Gender::from_patient_field(gender);
    if gender.is_some() && resolved.is_none() {
        tracing::info!(gender = ?gender, "Gender not recognized, gender clauses skipped");
    }
    let status = classify(MeasurementValue::Text(value), range, age, resolved);
    format!("{status} ({})", status.presentation_tag())
}

fn handle_check_range(range: &str) -> Result<String, CliError> {
    let spec = RangeSpec::parse(range);
    let mut json = serde_json::to_value(&spec)?;
    json["recognized"] = serde_json::Value::Bool(spec.is_recognized());
    Ok(serde_json::to_string_pretty(&json)?)
}

fn handle_report(
    catalog_path: &Path,
    request_path: Option<&Path>,
    pretty: bool,
) -> Result<String, CliError> {
    let catalog = ParameterCatalog::load(catalog_path)?;
    let catalog_warnings = catalog.validate();

    let request_json = match request_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let request: ReportRequest = serde_json::from_str(&request_json)?;
    let mut report = build_report(&catalog, &request)?;
    // Only the requested test's ranges matter to this report.
    if !catalog_warnings.is_empty() {
        if let Some(entry) = catalog.test(&report.test_name) {
            report.warnings.extend(entry.range_warnings());
        }
    }

    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(output)
}
