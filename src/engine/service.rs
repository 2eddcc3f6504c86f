//! HTTP service exposing the move engine.

use super::protocol::{MoveRequest, MoveResponse};
use super::search::{Minimax, ReplyError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    /// Fixed `"ok"` once the service accepts requests.
    pub status: &'static str,
}

/// Builds the engine router: `POST /api/get-ai-move` and `GET /api/health`.
pub fn router() -> Router {
    Router::new()
        .route("/api/get-ai-move", post(get_ai_move))
        .route("/api/health", get(health))
        .with_state(Minimax)
}

/// Binds `host:port` and serves the engine until shutdown.
#[instrument]
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "engine service listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

#[instrument(skip_all)]
async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[instrument(skip_all)]
async fn get_ai_move(
    State(engine): State<Minimax>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, Rejection> {
    let reply = engine.reply(&request).map_err(Rejection)?;
    info!(
        ai = %request.ai_symbol,
        chosen = reply.chosen,
        has_winner = reply.has_winner,
        "engine move served"
    );
    Ok(Json(reply))
}

/// Maps engine-side refusals onto HTTP statuses.
#[derive(Debug)]
struct Rejection(ReplyError);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ReplyError::TerminalBoard => StatusCode::UNPROCESSABLE_ENTITY,
            ReplyError::SymbolClash => StatusCode::BAD_REQUEST,
        };
        warn!(%status, reason = %self.0, "rejecting engine request");
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}
