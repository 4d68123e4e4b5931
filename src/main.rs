use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use talentx_api::RestApi;
use talentx_matching::{EngineConfig, MatchEngine};
use talentx_storage::DatasetStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Explainable talent matching server
#[derive(Parser, Debug)]
#[command(name = "talentx")]
#[command(about = "Rank employees against a benchmark profile", long_about = None)]
struct Args {
    /// Path to the JSON dataset (dimensions, benchmarks, employees)
    #[arg(short, long, default_value = "./data/talent.json")]
    data_file: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sub-score for dimensions an employee has no data for
    #[arg(long)]
    missing_penalty: Option<f64>,

    /// Pool size from which scoring runs in parallel
    #[arg(long)]
    parallel_threshold: Option<usize>,
}

impl Args {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        if let Some(penalty) = self.missing_penalty {
            config = config.with_missing_penalty(penalty);
        }
        if let Some(threshold) = self.parallel_threshold {
            config = config.with_parallel_threshold(threshold);
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("Starting TalentX v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.data_file);
    info!("HTTP API port: {}", args.http_port);

    let config = args.engine_config()?;
    info!(
        missing_penalty = config.missing_penalty,
        parallel_threshold = config.parallel_threshold,
        "Engine configured"
    );

    let store = Arc::new(DatasetStore::open(&args.data_file)?);
    let engine = Arc::new(MatchEngine::new(store, config)?);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("TalentX started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
