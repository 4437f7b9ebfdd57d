//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use salary_lookup::upstream::{Company, JobTitle, SalaryProvider, SalaryQuery, SalaryRecord};
use salary_lookup::{Result, SalaryError};

/// Provider returning canned data and counting calls.
#[derive(Default)]
pub struct StubProvider {
    pub companies: Vec<Company>,
    pub titles: Vec<JobTitle>,
    pub salaries: Vec<SalaryRecord>,
    pub fail_with_status: Option<u16>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    /// One employer, one job title, one USD record at 80k/100k/120k.
    pub fn acme() -> Self {
        Self {
            companies: vec![Company {
                id: 1,
                name: "Acme".into(),
                rating: Some(4.2),
            }],
            titles: vec![JobTitle {
                id: 9,
                label: "Engineer".into(),
            }],
            salaries: vec![serde_json::from_value(serde_json::json!({
                "currency": {"code": "USD"},
                "salaryCount": 57,
                "totalPayStatistics": {"percentiles": [
                    {"ident": "P25", "value": 80000},
                    {"ident": "P50", "value": 100000},
                    {"ident": "P75", "value": 120000}
                ]}
            }))
            .unwrap()],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(status) => Err(SalaryError::UpstreamTransport {
                status: Some(status),
                message: "upstream-secret-detail".into(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SalaryProvider for StubProvider {
    async fn search_companies(&self, _name: &str) -> Result<Vec<Company>> {
        self.record_call()?;
        Ok(self.companies.clone())
    }

    async fn search_job_titles(&self, _title: &str) -> Result<Vec<JobTitle>> {
        self.record_call()?;
        Ok(self.titles.clone())
    }

    async fn fetch_salaries(&self, _query: &SalaryQuery) -> Result<Vec<SalaryRecord>> {
        self.record_call()?;
        Ok(self.salaries.clone())
    }

    fn source_name(&self) -> &str {
        "Glassdoor"
    }
}
