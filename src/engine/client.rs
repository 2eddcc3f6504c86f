//! Client side of the engine exchange.

use super::protocol::{MoveRequest, MoveResponse};
use crate::game::{Board, Symbol};
use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// Failure to obtain an engine move, with location tracking.
///
/// Transport failures, non-success statuses, and malformed replies all
/// collapse into this one error: the session treats every engine failure
/// the same way and never retries.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine unavailable: {} at {}:{}", message, file, line)]
pub struct EngineUnavailable {
    /// Failure description.
    pub message: String,
    /// Line number where the failure was recorded.
    pub line: u32,
    /// Source file where the failure was recorded.
    pub file: &'static str,
}

impl EngineUnavailable {
    /// Creates a failure record with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for EngineUnavailable {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("transport error: {}", err))
    }
}

/// Supplier of moves for the engine seat.
///
/// The control loop talks to every engine through this seam: the remote
/// HTTP service in production, the in-process search for socket-free play,
/// scripted fakes in tests. One call, one move; retries, timeouts, and
/// cancellation are not part of the contract.
#[async_trait]
pub trait MoveEngine: Send + Sync {
    /// Requests one move for `engine` on `board`.
    async fn request_move(
        &self,
        board: &Board,
        engine: Symbol,
        human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable>;
}

/// Engine client speaking the HTTP protocol of the move service.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEngine {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MoveEngine for HttpEngine {
    #[instrument(skip(self, board), fields(engine = %engine, human = %human))]
    async fn request_move(
        &self,
        board: &Board,
        engine: Symbol,
        human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        let request = MoveRequest {
            board: board.clone(),
            ai_symbol: engine,
            human_symbol: human,
        };
        let url = format!("{}/api/get-ai-move", self.base_url);
        debug!(%url, "requesting engine move");

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "engine answered with a non-success status");
            return Err(EngineUnavailable::new(format!(
                "engine answered {}",
                status
            )));
        }

        let reply: MoveResponse = response
            .json()
            .await
            .map_err(|err| EngineUnavailable::new(format!("malformed engine reply: {}", err)))?;
        if reply.chosen > 8 {
            return Err(EngineUnavailable::new(format!(
                "engine chose the impossible cell {}",
                reply.chosen
            )));
        }
        debug!(
            chosen = reply.chosen,
            has_winner = reply.has_winner,
            is_full = reply.is_full,
            "engine replied"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpEngine::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_error_records_the_call_site() {
        let err = EngineUnavailable::new("boom");
        assert!(err.file.ends_with("client.rs"));
        assert!(err.to_string().contains("boom"));
    }
}
