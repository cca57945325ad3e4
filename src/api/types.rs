//! API request/response types

use serde::{Deserialize, Serialize};

use crate::models::errors::AppError;
use crate::utils::cache::CacheStats;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API error body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
        }
    }
}

/// Token scan request
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub token_address: String,
}

/// One registry entry for the rules listing endpoint
#[derive(Debug, Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub pattern_count: usize,
}

/// Health payload
#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Stats payload
#[derive(Debug, Serialize)]
pub struct StatsData {
    pub uptime_seconds: u64,
    pub source_cache: CacheStats,
    pub registered_rules: usize,
}
