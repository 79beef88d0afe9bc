use serde::{Deserialize, Serialize};

use crate::models::filter::Endpoint;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the REST API server
    pub port: u16,

    /// Endpoints excluded by default, loaded from `--endpoints`
    pub default_endpoints: Vec<Endpoint>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            default_endpoints: Vec::new(),
        }
    }
}
