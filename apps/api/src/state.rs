use crate::config::Config;
use crate::evaluation::matching::MatchingPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Evaluation pipeline; owns the inference client and pipeline settings.
    pub pipeline: MatchingPipeline,
    pub config: Config,
}
