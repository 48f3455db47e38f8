//! Application state.

use secretinject_config::Converter;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub converter: Converter,
    pub secret: Arc<str>,
}

impl AppState {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            converter: Converter::new(),
            secret: secret.into(),
        }
    }
}
