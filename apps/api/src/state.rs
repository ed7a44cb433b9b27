use std::sync::Arc;

use crate::config::Config;
use crate::intake::session::IntakeService;
use crate::storage::gateway::PersistenceGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub intake: Arc<IntakeService>,
    /// Read side of the stores for the candidate listing endpoints.
    pub gateway: Arc<PersistenceGateway>,
}
