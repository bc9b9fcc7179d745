use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm_client::CompletionBackend;
use crate::session::SessionState;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Capability boundary to the generation service. Tests swap in a stub.
    pub backend: Arc<dyn CompletionBackend>,
    /// The single user session. The lock is held across a stage's round trip,
    /// which keeps at most one generation request in flight.
    pub session: Arc<Mutex<SessionState>>,
}
