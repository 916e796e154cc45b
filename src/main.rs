use article_server::config::Config;
use article_server::db::{ArticleRepository, StorageGateway};
use article_server::router::{ArticleState, article_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    let cfg = Config::load();

    let loglevel = cfg
        .as_ref()
        .map(|c| c.loglevel.clone())
        .unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if dotenv.is_err() {
        warn!("⚠️  No .env file found, using system environment variables.");
    }

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "❌ invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        database_url = %cfg.redacted_database_url(),
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        max_connections = cfg.max_connections
    );

    let gateway = match StorageGateway::connect(&cfg.database_url, cfg.max_connections).await {
        Ok(gateway) => gateway,
        Err(e) => {
            error!(error = %e, "❌ Could not connect to database");
            std::process::exit(1);
        }
    };
    info!("✅ Connected to database");

    let state = ArticleState::new(ArticleRepository::new(gateway.clone()));
    let app = article_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("🚀 HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.pool().close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
