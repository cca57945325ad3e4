//! rugscan API server
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   ETH_HTTP_URL          - JSON-RPC endpoint
//!   ETH_HTTP_FALLBACK_URL - optional public fallback RPC
//!   EXPLORER_API_URL      - Etherscan-compatible API base
//!   ETHERSCAN_API_KEY     - explorer API key
//!   PRICE_SUBGRAPH_URL    - derivedUSD subgraph endpoint
//!   RUGSCAN_HOST / PORT   - bind address (default 0.0.0.0:8080)
//!   RUST_LOG              - log filter (default info)

use rugscan::api::{create_router, handlers::AppState};
use rugscan::{ScannerConfig, TokenAnalyzer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ScannerConfig::from_env();
    let analyzer = TokenAnalyzer::new(&config)?;
    let state = Arc::new(AppState::new(analyzer));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("rugscan API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /v1/scan/token  - full token risk report");
    info!("  GET  /v1/rules       - registered heuristic rules");
    info!("  GET  /v1/stats       - cache / uptime stats");
    info!("  GET  /v1/health      - health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("rugscan shutdown complete");
    Ok(())
}
