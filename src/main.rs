use anyhow::{Context, Result};
use clap::Parser;
use qa_capture::{AppState, AssetFetcher, Config, SessionManager, SetFetcher, SnapshotStore};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "qa-capture", about = "Response session service for fine-tuning datasets")]
struct Args {
    /// Config file (without extension), e.g. config/qa-capture
    #[arg(long, default_value = "config/qa-capture")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load_or_default(&args.config)?;

    info!("qa-capture v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Snapshot path: {}", cfg.storage.snapshot_path);

    let store = SnapshotStore::new(&cfg.storage.snapshot_path);
    let mut manager = SessionManager::restore_or_new(store, cfg.capture.max_restart_attempts).await;

    let fetcher = Arc::new(AssetFetcher::new(&cfg.assets.question_sets_path));

    // A fresh session starts on the default built-in set; a restored one
    // keeps whatever it had.
    if manager.session().questions().is_empty() {
        match fetcher.fetch(&cfg.assets.default_set).await {
            Ok(content) => {
                let label = qa_capture::questions::set_label(&cfg.assets.default_set);
                match manager.load_csv(&content, Some(label), None).await {
                    Ok(count) => info!("Loaded default question set ({} questions)", count),
                    Err(e) => warn!("Default question set is invalid: {}", e),
                }
            }
            Err(e) => warn!("No default question set available: {}", e),
        }
    } else {
        info!(
            "Resumed session: {} questions, cursor {}",
            manager.session().questions().len(),
            manager.session().cursor()
        );
    }

    let state = AppState::new(manager, fetcher).with_export_layout(cfg.export.layout);
    let router = qa_capture::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
