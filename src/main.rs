use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vpn_server_selector::cli_arguments::CliArguments;
use vpn_server_selector::select_server::score_select_server::ScoreSelectServer;
use vpn_server_selector::server_repository::{
    postgres_server_repository::PostgresServerRepository, server_repository::ServerRepository,
};
use vpn_server_selector::{ServerState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: CliArguments = CliArguments::parse();

    let repository: Option<Arc<dyn ServerRepository>> = match args.database_url.as_deref() {
        Some(database_url) => {
            let repository =
                PostgresServerRepository::connect_lazy(database_url, args.max_connections)?;

            if args.migrate {
                repository.migrate().await?;
                info!("Database migrations applied");
            }

            Some(Arc::new(repository))
        }
        None => {
            warn!("No database configured, datastore requests will fail");
            None
        }
    };

    let tcp_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

    info!("Server started on port {}", args.port);

    let state = ServerState::new(repository, Arc::new(ScoreSelectServer::new()));

    axum::serve(tcp_listener, router(state)).await?;

    Ok(())
}
