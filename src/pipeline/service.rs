//! Salary Service
//!
//! Each lookup step checks its own cache namespace before calling the
//! provider. Concurrent misses on the same key may both reach the provider;
//! the later write simply overwrites the earlier one.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument};

use crate::cache::{make_key, Namespace, SharedCache, LOOKUP_TTL, SALARY_TTL};
use crate::error::{Result, SalaryError};
use crate::format::sanitize_name;
use crate::pipeline::SalaryInfo;
use crate::upstream::{Company, JobTitle, SalaryProvider, SalaryQuery, SalaryRecord};

/// Orchestrates cached lookups against a [`SalaryProvider`].
#[derive(Clone)]
pub struct SalaryService {
    cache: SharedCache,
    provider: Arc<dyn SalaryProvider>,
}

impl SalaryService {
    pub fn new(cache: SharedCache, provider: Arc<dyn SalaryProvider>) -> Self {
        Self { cache, provider }
    }

    /// The store this service reads and writes.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Cache Helpers ==
    // The lock is never held across a provider call.

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let hit = self.cache.write().await.get_as::<T>(key);
        debug!(key, hit = hit.is_some(), "Cache lookup");
        hit
    }

    async fn store<T: Serialize>(&self, key: String, value: &T, ttl: Duration) -> Result<()> {
        self.cache.write().await.set_as(key, value, ttl)
    }

    // == Company Lookup ==
    /// Employers matching `name`. Non-empty results are cached for 30 days.
    #[instrument(skip(self))]
    pub async fn lookup_companies(&self, name: &str) -> Result<Vec<Company>> {
        let key = make_key(Namespace::Company, &[name]);
        if let Some(companies) = self.cached::<Vec<Company>>(&key).await {
            return Ok(companies);
        }

        let companies = self.provider.search_companies(name).await?;
        if !companies.is_empty() {
            self.store(key, &companies, LOOKUP_TTL).await?;
        }
        Ok(companies)
    }

    // == Job Title Lookup ==
    /// Job title suggestions for `title`. Non-empty results are cached for 30 days.
    #[instrument(skip(self))]
    pub async fn lookup_job_titles(&self, title: &str) -> Result<Vec<JobTitle>> {
        let key = make_key(Namespace::Job, &[title]);
        if let Some(titles) = self.cached::<Vec<JobTitle>>(&key).await {
            return Ok(titles);
        }

        let titles = self.provider.search_job_titles(title).await?;
        if !titles.is_empty() {
            self.store(key, &titles, LOOKUP_TTL).await?;
        }
        Ok(titles)
    }

    // == Salary Lookup ==
    /// Salary aggregates for a resolved pair. Always a live call; only the
    /// composed result is cached.
    #[instrument(skip(self))]
    pub async fn lookup_salaries(
        &self,
        company_id: u64,
        job_title_id: u64,
        job_title: &str,
    ) -> Result<Vec<SalaryRecord>> {
        let query = SalaryQuery {
            company_id,
            job_title_id,
            job_title: job_title.to_string(),
        };
        self.provider.fetch_salaries(&query).await
    }

    // == Orchestrator ==
    /// Resolves company and job title, fetches salaries and composes the result.
    ///
    /// An empty company or job title search fails the request. An empty
    /// salary result does not: the composed result carries "N/A" figures.
    #[instrument(skip(self))]
    pub async fn get_salary_info(&self, company_name: &str, job_title: &str) -> Result<SalaryInfo> {
        let company_name = sanitize_name(company_name);
        let job_title = sanitize_name(job_title);

        let key = make_key(Namespace::Salary, &[&company_name, &job_title]);
        if let Some(info) = self.cached::<SalaryInfo>(&key).await {
            info!("Serving salary info from cache");
            return Ok(info);
        }

        if company_name.is_empty() {
            return Err(SalaryError::no_company(&company_name));
        }
        let company = self
            .lookup_companies(&company_name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SalaryError::no_company(&company_name))?;

        if job_title.is_empty() {
            return Err(SalaryError::no_job_title(&job_title));
        }
        let job = self
            .lookup_job_titles(&job_title)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SalaryError::no_job_title(&job_title))?;

        let record = self
            .lookup_salaries(company.id, job.id, &job.label)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();
        if record.salary_count == 0 {
            debug!(company_id = company.id, job_title_id = job.id, "No salary reports for pair");
        }

        let info = SalaryInfo::compose(&company, &job, &record, self.provider.source_name());
        self.store(key, &info, SALARY_TTL).await?;

        info!(company = %info.company.name, job = %info.job.title, "Composed salary info");
        Ok(info)
    }
}
