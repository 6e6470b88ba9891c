//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::GatewayService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
}

impl AppState {
    pub fn new(gateway: Arc<GatewayService>) -> Self {
        Self { gateway }
    }
}
