use clap::Parser;
use loanscope_api::RestApi;
use loanscope_storage::{EngineConfig, ScoringEngine};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Loan application scoring and similarity service
#[derive(Parser, Debug)]
#[command(name = "loanscope")]
#[command(about = "Score loan applications and find similar ones", long_about = None)]
struct Args {
    /// Directory holding datasets and the classifier artifact
    #[arg(short, long, default_value = "/app/data")]
    data_dir: PathBuf,

    /// Training dataset (JSON lines, optionally .gz)
    #[arg(long, default_value = "training_data.json")]
    training_data: PathBuf,

    /// Testing dataset (JSON lines, optionally .gz)
    #[arg(long, default_value = "testing_data.json")]
    testing_data: PathBuf,

    /// Classifier artifact
    #[arg(long, default_value = "logreg_classifier.json")]
    model: PathBuf,

    /// Expected SHA-256 of the classifier artifact
    #[arg(long)]
    model_sha256: Option<String>,

    /// HTTP API port
    #[arg(long, default_value_t = 8050)]
    http_port: u16,

    /// Log level or filter directives (e.g. `warn,loanscope_storage=debug`)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            data_dir: self.data_dir.clone(),
            training_data: self.training_data.clone(),
            testing_data: self.testing_data.clone(),
            model_path: self.model.clone(),
            model_sha256: self.model_sha256.clone(),
        }
    }
}

/// Parse `--log-level`; malformed directives are a startup error
fn log_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("invalid --log-level '{}': {}", directives, e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(&args.log_level)?)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting LoanScope v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    // Load failures are fatal: nothing is served from a partial store
    let config = args.engine_config();
    let engine = Arc::new(
        tokio::task::spawn_blocking(move || ScoringEngine::open(&config)).await??,
    );
    info!("Engine initialized");

    let engine_http = engine.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine_http, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("LoanScope started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

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
