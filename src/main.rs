mod api;
mod config;
mod mixpeek;
mod search;

pub const USER_AGENT: &str = concat!("vsearch/", env!("CARGO_PKG_VERSION"));

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use api::AppState;
use config::Config;
use mixpeek::MixpeekClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is the normal case in production.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vsearch=info".parse()?),
        )
        .init();

    let config = Config::parse();

    let http = mixpeek::build_http_client(config.connect_timeout(), config.provider_timeout())?;
    let provider = MixpeekClient::from_config(http, &config);
    let app = api::router(AppState::new(provider, &config.default_collection));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("failed to bind {addr}: {e}"))?;

    info!(
        %addr,
        base_url = %config.base_url,
        default_collection = %config.default_collection,
        "starting vsearch"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
