//! HTTP transport for MCP using Axum
//!
//! JSON-RPC 2.0 over POST /mcp, with UUID sessions carried in the
//! `Mcp-Session-Id` header.

pub mod error;
pub mod handler;
pub mod jsonrpc;
pub mod session;

use axum::{routing::post, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::HttpConfig;
use crate::tools::ToolDispatcher;
use handler::handle_jsonrpc;
use session::SessionStore;

pub use handler::AppState;

/// Build the MCP router
///
/// CORS allows all origins; the server binds to loopback unless `HTTP_HOST`
/// says otherwise.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([axum::http::HeaderName::from_static(handler::SESSION_HEADER)]);

    Router::new()
        .route("/mcp", post(handle_jsonrpc))
        .layer(cors)
        .with_state(state)
}

/// Start HTTP server with the MCP JSON-RPC endpoint
///
/// Runs until Ctrl+C.
pub async fn start_http_server(
    config: HttpConfig,
    dispatcher: ToolDispatcher,
) -> anyhow::Result<()> {
    tracing::info!("Initializing HTTP MCP server...");

    let state = AppState::new(SessionStore::new(config.max_sessions), dispatcher);
    let tool_count = state.dispatcher.list_tools().len();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!("HTTP MCP server listening on {}", addr);
    tracing::info!("Endpoint: POST http://{}/mcp", addr);
    tracing::info!("  - {} tools (market data, account, orders, wallet)", tool_count);
    tracing::info!("Session management:");
    tracing::info!("  - Max concurrent sessions: {}", config.max_sessions);
    tracing::info!("  - Session timeout: {} minutes", session::SESSION_IDLE_MINUTES);
    tracing::info!("  - Header: Mcp-Session-Id (UUID)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal (Ctrl+C)"),
                Err(err) => {
                    tracing::error!("Failed to listen for shutdown signal: {}", err);
                    std::future::pending::<()>().await;
                }
            }
            tracing::info!("Shutting down HTTP server...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
