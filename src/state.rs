use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::gateway::QuestionGenerator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: Arc<dyn QuestionGenerator>,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuestionGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
