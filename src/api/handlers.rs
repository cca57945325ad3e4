//! API request handlers

use alloy_primitives::Address;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::types::*;
use crate::analyzer::TokenAnalyzer;
use crate::core::rules::registry;
use crate::models::errors::AppError;
use crate::models::types::SecurityReport;
use crate::providers::SourceClient;

/// Shared application state
pub struct AppState {
    pub analyzer: TokenAnalyzer,
    pub source: Arc<SourceClient>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(analyzer: TokenAnalyzer) -> Self {
        let source = analyzer.source_client();
        Self::spawn_cache_cleanup(Arc::clone(&source));
        Self {
            analyzer,
            source,
            start_time: Instant::now(),
        }
    }

    /// Periodically evict expired source-cache entries so the stats
    /// endpoint reports live counts even without read traffic.
    fn spawn_cache_cleanup(source: Arc<SourceClient>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            interval.tick().await; // first tick completes immediately
            loop {
                interval.tick().await;
                let removed = source.cache().cleanup_expired();
                if removed > 0 {
                    debug!("evicted {} expired source cache entries", removed);
                }
            }
        });
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn reject(status: StatusCode, error: ApiError, start: Instant) -> HandlerError {
    (
        status,
        Json(ApiResponse::error(error, elapsed_ms(start))),
    )
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        uptime_seconds: state.uptime_seconds(),
        source_cache: state.source.cache().stats(),
        registered_rules: registry().len(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

pub async fn list_rules(State(_state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<RuleInfo>>> {
    let start = Instant::now();

    let rules: Vec<RuleInfo> = registry()
        .iter()
        .map(|rule| RuleInfo {
            name: rule.name,
            kind: rule.kind.as_str(),
            pattern_count: rule.pattern_count(),
        })
        .collect();

    Json(ApiResponse::success(rules, elapsed_ms(start)))
}

pub async fn scan_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ApiResponse<SecurityReport>>, HandlerError> {
    let start = Instant::now();

    // Malformed addresses are caller errors, rejected before analysis
    let token: Address = req.token_address.parse().map_err(|_| {
        let err = AppError::invalid_address(format!(
            "Invalid token address: {}",
            req.token_address
        ));
        reject(app_error_status(&err), ApiError::from(&err), start)
    })?;

    let report = state.analyzer.analyze(token).await.map_err(|e| {
        warn!("scan failed for {}: {}", req.token_address, e);
        reject(app_error_status(&e), ApiError::from(&e), start)
    })?;

    Ok(Json(ApiResponse::success(report, elapsed_ms(start))))
}

fn app_error_status(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
