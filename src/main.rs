use medview::infrastructure::session::{in_memory::InMemorySessionStore, prune_expired};
use medview::{CONFIG, api_routes, build_service};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(config = ?*CONFIG, "starting medview");

    // Credential table, feedback store, upload directory
    let service = build_service(&CONFIG).await?;

    // Session records, pruned once a minute
    let sessions = InMemorySessionStore::new();
    tokio::spawn(prune_expired(sessions.clone(), Duration::from_secs(60)));

    let app = api_routes(service, sessions, &CONFIG);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
