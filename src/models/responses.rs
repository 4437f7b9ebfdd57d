//! Response DTOs for the salary API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::pipeline::SalaryInfo;

/// Response body for `GET /api/salary`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryResponse {
    pub job_title: String,
    pub company: String,
    pub company_rating: Option<f64>,
    pub location: String,
    pub average_salary: String,
    pub salary_range: String,
    pub salary_count: u64,
    /// `"<provider> (<N> salary reports)"`
    pub source: String,
    pub timestamp: String,
    pub request_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_stats: Option<CacheStats>,
}

impl SalaryResponse {
    pub fn new(info: SalaryInfo, location: String, request_time_ms: u64) -> Self {
        Self {
            source: format!("{} ({} salary reports)", info.source, info.job.salary_count),
            job_title: info.job.title,
            company: info.company.name,
            company_rating: info.company.rating,
            location,
            average_salary: info.salary.median,
            salary_range: info.salary.range,
            salary_count: info.job.salary_count,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_time_ms,
            cache_stats: None,
        }
    }

    pub fn with_cache_stats(mut self, stats: CacheStats) -> Self {
        self.cache_stats = Some(stats);
        self
    }
}

/// Response body for `DELETE /api/cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub cleared: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
