use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use content_forge::{
    config::Config,
    api::routes::create_router,
    http::build_client,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("content_forge=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    // One connection pool for the whole process
    let client = build_client(&config)?;
    let app_state = AppState::new(config, client);

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
