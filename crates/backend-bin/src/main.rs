use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use suburbsight_backend_lib::{
    config::Settings,
    rate_limit::spawn_sweeper,
    router,
    storage::FlatFileStorage,
    AppState,
};

/// How often elapsed rate-limit windows are reclaimed.
const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[derive(Parser)]
#[command(name = "suburbsight-backend", version, about = "Suburbsight site backend")]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from(&cli.config)?;
    settings.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bind = cli.bind.unwrap_or(settings.bind_addr);
    let storage = Arc::new(FlatFileStorage::new(&settings.data_dir)?);
    let state = Arc::new(AppState::new(settings, storage));

    // Sweeping is memory reclamation only; admission treats elapsed windows
    // as absent either way.
    spawn_sweeper(state.rate_limiter.clone(), SWEEP_INTERVAL);
    spawn_sweeper(state.login_limiter.clone(), SWEEP_INTERVAL);

    let app = router::create_router(state);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
