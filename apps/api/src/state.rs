use std::sync::Arc;

use crate::config::Config;
use crate::validation::CvValidationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validation engine. Holds the `TextGenerator` and the immutable
    /// validation config; safe for any number of concurrent requests.
    pub engine: Arc<CvValidationEngine>,
}
