//! Upstream Module
//!
//! The salary data provider: its records, the trait the pipeline calls, and
//! the HTTP implementation.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::HttpSalaryProvider;
pub use types::{Company, JobTitle, Percentile, SalaryQuery, SalaryRecord};

/// Remote lookups backing the pipeline. Each call is one outbound exchange;
/// implementations do not cache or retry.
#[async_trait]
pub trait SalaryProvider: Send + Sync {
    /// Employers matching a company name, best match first.
    async fn search_companies(&self, name: &str) -> Result<Vec<Company>>;

    /// Job title suggestions for free text, best match first.
    async fn search_job_titles(&self, title: &str) -> Result<Vec<JobTitle>>;

    /// Salary aggregates for a resolved company and job title.
    async fn fetch_salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRecord>>;

    /// Name reported as the data source.
    fn source_name(&self) -> &str;
}
