//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::Method,
    Json,
};
use tracing::{info, warn};

use crate::cache::{self, CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{Result, SalaryError};
use crate::models::{ClearParams, ClearResponse, HealthResponse, SalaryParams, SalaryResponse};
use crate::pipeline::SalaryService;
use crate::upstream::{HttpSalaryProvider, SalaryProvider};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached lookup pipeline (owns the shared cache handle)
    pub service: SalaryService,
}

impl AppState {
    /// Creates a new AppState around a store and a provider.
    pub fn new(cache: CacheStore, provider: Arc<dyn SalaryProvider>) -> Self {
        Self {
            service: SalaryService::new(cache::shared(cache), provider),
        }
    }

    /// Creates a new AppState from configuration, talking to the real provider.
    pub fn from_config(config: &Config) -> Self {
        let provider = HttpSalaryProvider::new(config);
        if let Some(problem) = provider.configuration_error() {
            warn!("Upstream not configured, salary lookups will fail: {}", problem);
        }
        Self::new(CacheStore::new(), Arc::new(provider))
    }

    pub fn cache(&self) -> &SharedCache {
        self.service.cache()
    }
}

/// Handler for /api/salary
///
/// Only GET is served; other methods get the generic 404 whatever their
/// query string. A query string that does not deserialize is a 400.
pub async fn salary_handler(
    State(state): State<AppState>,
    method: Method,
    query: std::result::Result<Query<SalaryParams>, QueryRejection>,
) -> Result<Json<SalaryResponse>> {
    if method != Method::GET {
        return Err(SalaryError::NotFound);
    }

    let started = Instant::now();
    let Query(params) = query.map_err(|e| SalaryError::InvalidRequest(e.body_text()))?;
    let request = params.validate()?;

    info!(
        company = %request.company_name,
        job_title = %request.job_title,
        "Salary lookup requested"
    );
    let info = state
        .service
        .get_salary_info(&request.company_name, &request.job_title)
        .await?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let mut response = SalaryResponse::new(info, request.location, elapsed_ms);
    if request.show_cache_stats {
        response = response.with_cache_stats(state.cache().read().await.stats());
    }

    Ok(Json(response))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache().read().await;
    Json(cache.stats())
}

/// Handler for DELETE /api/cache
///
/// Clears one namespace (or delimited prefix) when `prefix` is given,
/// everything otherwise.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Json<ClearResponse> {
    let prefix = params.prefix.filter(|p| !p.is_empty());
    let cleared = state.cache().write().await.clear(prefix.as_deref());

    info!(prefix = ?prefix, cleared, "Cache cleared");
    Json(ClearResponse { cleared })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> SalaryError {
    SalaryError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    fn params(company: &str, job: &str) -> SalaryParams {
        SalaryParams {
            company_name: Some(company.into()),
            job_title: Some(job.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_salary_handler_rejects_other_methods() {
        let result = salary_handler(
            State(unconfigured_state()),
            Method::POST,
            Ok(Query(params("Acme", "Engineer"))),
        )
        .await;
        assert!(matches!(result, Err(SalaryError::NotFound)));
    }

    #[tokio::test]
    async fn test_salary_handler_validates_before_lookup() {
        let result = salary_handler(
            State(unconfigured_state()),
            Method::GET,
            Ok(Query(SalaryParams::default())),
        )
        .await;
        assert!(matches!(result, Err(SalaryError::InvalidRequest(ref m)) if m.contains("jobTitle")));
    }

    #[tokio::test]
    async fn test_salary_handler_without_upstream_config() {
        let result = salary_handler(
            State(unconfigured_state()),
            Method::GET,
            Ok(Query(params("Acme", "Engineer"))),
        )
        .await;
        assert!(matches!(result, Err(SalaryError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_cache_stats_and_clear_handlers() {
        let state = unconfigured_state();
        {
            let mut cache = state.cache().write().await;
            cache.set_default("company:acme", serde_json::json!([]));
            cache.set_default("job:engineer", serde_json::json!([]));
        }

        let stats = cache_stats_handler(State(state.clone())).await;
        assert_eq!(stats.total_entries, 2);

        let cleared = clear_cache_handler(
            State(state.clone()),
            Query(ClearParams {
                prefix: Some("company".into()),
            }),
        )
        .await;
        assert_eq!(cleared.cleared, 1);

        let cleared = clear_cache_handler(State(state.clone()), Query(ClearParams::default())).await;
        assert_eq!(cleared.cleared, 1);
        assert!(state.cache().read().await.is_empty());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
