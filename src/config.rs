/// Application-level constants
pub const APP_NAME: &str = "labstatus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on rows in one generated report. Extra entries are dropped
/// with a warning.
pub const MAX_REPORT_ENTRIES: usize = 100;

/// Filter used when `RUST_LOG` is unset. Logs go to stderr.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=info")
}
