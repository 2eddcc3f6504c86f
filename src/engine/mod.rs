//! Engine collaborators: the wire protocol, the HTTP client, the in-process
//! minimax search, and the HTTP service wrapping it.

mod client;
mod protocol;
mod search;
mod service;

pub use client::{EngineUnavailable, HttpEngine, MoveEngine};
pub use protocol::{MoveRequest, MoveResponse};
pub use search::{Minimax, ReplyError};
pub use service::{Health, router, serve};
