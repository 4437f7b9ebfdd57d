//! Composed salary result, the unit cached under the combined key.

use serde::{Deserialize, Serialize};

use crate::format::format_salary;
use crate::upstream::{Company, JobTitle, SalaryRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub name: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub title: String,
    pub salary_count: u64,
}

/// Formatted pay figures. Each amount is already rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryFigures {
    pub currency: String,
    pub low: String,
    pub median: String,
    pub high: String,
    pub range: String,
}

/// Everything known about one company + job title pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInfo {
    pub company: CompanySummary,
    pub job: JobSummary,
    pub salary: SalaryFigures,
    pub source: String,
    /// RFC 3339 time the result was composed
    pub timestamp: String,
}

impl SalaryInfo {
    /// Builds the result from the resolved company, job title and the first
    /// salary record (a blank record when the provider had none).
    pub fn compose(
        company: &Company,
        job: &JobTitle,
        record: &SalaryRecord,
        source: &str,
    ) -> Self {
        let currency = record.currency_code();
        let low = format_salary(record.percentile("P25"), currency);
        let median = format_salary(record.percentile("P50"), currency);
        let high = format_salary(record.percentile("P75"), currency);
        let range = format!("{} - {}", low, high);

        Self {
            company: CompanySummary {
                name: company.name.clone(),
                rating: company.rating,
            },
            job: JobSummary {
                title: record
                    .job_title_text()
                    .unwrap_or(job.label.as_str())
                    .to_string(),
                salary_count: record.salary_count,
            },
            salary: SalaryFigures {
                currency: currency.to_string(),
                low,
                median,
                high,
                range,
            },
            source: source.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
