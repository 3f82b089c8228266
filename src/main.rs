use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use exam_checker::app::App;
use exam_checker::backend::SimulatedBackend;
use exam_checker::config::AppConfig;
use exam_checker::generator::ExamSynthesizer;
use exam_checker::{ExamError, Result};

#[derive(Parser)]
#[command(
    name = "exam-checker",
    version,
    about = "Terminal dashboard for creating exams and reviewing grading results"
)]
struct Cli {
    /// Config file path (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the mock grading data
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (defaults to the user data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let config = match cli.seed {
        Some(seed) => config.with_seed(Some(seed)),
        None => config,
    };

    let log_file = match cli.log_file {
        Some(path) => path,
        None => AppConfig::log_file_path()?,
    };
    init_logging(&log_file, &config.log_filter)?;
    tracing::info!(seed = ?config.seed, "starting exam-checker");

    let backend = Arc::new(SimulatedBackend::new(
        config.simulation.clone(),
        ExamSynthesizer::from_seed(config.seed),
    ));

    let mut app = App::new(&config, backend)?;
    app.init()?;
    let outcome = app.run().await;
    app.shutdown()?;

    if let Err(e) = &outcome {
        tracing::error!("application error: {}", e);
    }
    outcome
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) if !path.exists() => Err(ExamError::Config(format!(
            "Config file {} does not exist",
            path.display()
        ))),
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Log to a file; the terminal belongs to the UI. `RUST_LOG` overrides the
/// configured filter.
fn init_logging(path: &Path, filter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ExamError::Config(format!("Failed to initialise logging: {}", e)))
}
