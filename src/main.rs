use tokio::io::BufReader;
use tracing::Level;

use wellness_monitor::api::{serve_lines, WellnessService};
use wellness_monitor::config::Configuration;
use wellness_monitor::error::AppError;
use wellness_monitor::pipeline::Detectors;

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// One JSON request per stdin line, one JSON response per stdout line.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    let path = std::env::args().nth(1);
    let configuration = Configuration::load(path.as_deref())?;
    init_logging(configuration.log_level()?);

    // Models are wired in by embedders; the bare binary serves every route
    // and answers model-backed ones with error results.
    let service = WellnessService::builder(configuration)
        .with_detectors(Detectors::new())
        .build()?;

    serve_lines(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        service,
    )
    .await
}
