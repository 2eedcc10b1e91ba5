//! Data Transfer Objects
//!
//! Query parameters and JSON bodies of the HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::data::CacheStats;

/// Sidebar controls as sent in the query string of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub show_code: Option<String>,
}

/// Display settings for `GET /api/v1/views/:page`
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub show_code: Option<String>,
    /// Overrides the configured sample seed
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output format of the sample data export
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    #[default]
    Json,
    Csv,
}

/// Query for `GET /api/v1/sample-data`
#[derive(Debug, Default, Deserialize)]
pub struct SampleParams {
    #[serde(default)]
    pub format: SampleFormat,
    #[serde(default)]
    pub seed: Option<u64>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Sample cache counters
    pub cache: CacheStats,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
