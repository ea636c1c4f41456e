use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use widgetboard_lib::datamule_api::Client;
use widgetboard_lib::{Catalog, IndicatorPipeline, Settings};
use widgetboard_server::{build_router, AppState};

#[derive(Parser)]
#[command(name = "widgetboard")]
#[command(about = "Serve indicator widgets for a dashboard frontend")]
struct Cli {
    /// Interface to bind
    #[arg(long, env = "WIDGETBOARD_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "WIDGETBOARD_PORT", default_value_t = 7779)]
    port: u16,

    /// App layouts served at /apps.json
    #[arg(long, env = "WIDGETBOARD_APPS_JSON", default_value = "apps.json")]
    apps_json: PathBuf,

    /// YAML widget catalog replacing the built-in one
    #[arg(long, env = "WIDGETBOARD_CATALOG")]
    catalog: Option<PathBuf>,

    /// Allowed CORS origin (repeatable)
    #[arg(
        long = "cors-origin",
        env = "WIDGETBOARD_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "https://pro.openbb.co"
    )]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("widgetboard=info".parse()?)
                .add_directive("datamule_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    tracing::info!("Loaded catalog with {} widgets", catalog.len());

    let client = Client::with_base_url(&settings.source_base_url, settings.fetch_timeout)?;
    let pipeline = IndicatorPipeline::new(client);
    let registry = pipeline.populate(&catalog, settings.startup_timeout).await;

    let state = AppState::new(registry, pipeline, cli.apps_json, &settings.llama_url);
    let app = build_router(state, &cli.cors_origins);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
