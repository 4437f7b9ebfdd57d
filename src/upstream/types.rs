//! Upstream Types
//!
//! Records returned by the salary data provider, plus the wire envelopes
//! they arrive in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Records ==

/// Employer matched by a company search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    #[serde(rename = "overallRating", default)]
    pub rating: Option<f64>,
}

/// Job title suggestion from the autocomplete search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTitle {
    pub id: u64,
    pub label: String,
}

/// One `{ident, value}` pair such as `{"ident": "P50", "value": 100000}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percentile {
    pub ident: String,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTitleText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayStatistics {
    #[serde(default)]
    pub percentiles: Vec<Percentile>,
}

/// Aggregated pay data for one company + job title pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    #[serde(default)]
    pub currency: Option<CurrencyInfo>,
    #[serde(default)]
    pub salary_count: u64,
    #[serde(default)]
    pub job_title: Option<JobTitleText>,
    #[serde(default)]
    pub total_pay_statistics: Option<PayStatistics>,
}

impl SalaryRecord {
    /// Currency code, "" when the record has none.
    pub fn currency_code(&self) -> &str {
        self.currency.as_ref().map(|c| c.code.as_str()).unwrap_or("")
    }

    /// Looks up a percentile by its identifier (e.g. "P25"), not by position.
    pub fn percentile(&self, ident: &str) -> Option<f64> {
        self.total_pay_statistics
            .as_ref()?
            .percentiles
            .iter()
            .find(|p| p.ident == ident)
            .and_then(|p| p.value)
    }

    /// Job title text reported with the salary data, if non-empty.
    pub fn job_title_text(&self) -> Option<&str> {
        self.job_title
            .as_ref()
            .map(|t| t.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Parameters for a salary aggregation query.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryQuery {
    pub company_id: u64,
    pub job_title_id: u64,
    pub job_title: String,
}

// == Wire Envelopes ==

/// `{"json": {"response": {"employers": [...]}}}`
#[derive(Debug, Deserialize)]
pub(crate) struct CompanySearchEnvelope {
    pub json: CompanySearchJson,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanySearchJson {
    pub response: CompanySearchResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanySearchResponse {
    pub employers: Vec<Company>,
}

/// One operation in a batched GraphQL request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlOperation<'a> {
    pub operation_name: &'a str,
    pub variables: Value,
    pub query: &'a str,
}

/// One element of a batched GraphQL response.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OccAutocompleteData {
    #[serde(rename = "occAutocomplete")]
    pub suggestions: Vec<JobTitle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployerSalariesData {
    pub salaries_by_employer: SalariesByEmployer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SalariesByEmployer {
    pub results: Vec<SalaryRecord>,
}
