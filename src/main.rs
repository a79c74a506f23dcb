use clap::Parser;
use folio::app::server::{router, shutdown_signal, AppState};
use folio::config::server::LogFormat;
use folio::utils::{logger, validation::Validate};
use folio::{GoogleSheets, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在時直接略過
    let dotenv_path = dotenvy::dotenv().ok();

    let config = ServerConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting folio contact relay");
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let sheets = GoogleSheets::new(config.sheets_settings()?)?;
    tracing::info!(
        "Appending to spreadsheet {} range {}",
        sheets.settings().spreadsheet_id,
        sheets.settings().range()
    );

    let app = router(AppState::new(Arc::new(sheets)));
    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server running on port {}", addr.port());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
