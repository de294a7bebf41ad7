pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod models;
pub mod report;

pub use classifier::{classify, status_to_presentation_tag};
pub use models::{Gender, MeasurementValue, PresentationTag, ResultStatus};

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    tracing::debug!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    match cli::execute(cli.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
