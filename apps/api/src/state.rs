use sqlx::PgPool;

use crate::compose_client::ComposeClient;
use crate::llm_client::ChatClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// SMS composition upstream. An unconfigured key degrades to heuristic copy.
    pub composer: ComposeClient,
    /// Chat-completion upstream for follow-up emails. Same degradation rule.
    pub chat: ChatClient,
}
