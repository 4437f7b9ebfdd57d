//! HTTP client for the salary data provider.
//!
//! Company search is a plain GET; job title autocomplete and salary
//! aggregation share one batched GraphQL endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::types::{
    Company, CompanySearchEnvelope, EmployerSalariesData, GraphQlOperation, GraphQlResponse,
    JobTitle, OccAutocompleteData, SalaryQuery, SalaryRecord,
};
use super::SalaryProvider;
use crate::config::{Config, UpstreamConfig};
use crate::error::{Result, SalaryError};

pub const COMPANY_SEARCH_PATH: &str = "/api-web/employer/find.htm";
pub const GRAPHQL_PATH: &str = "/graph";

const JOB_TITLE_OPERATION: &str = "OccAutocomplete";
const JOB_TITLE_QUERY: &str = "query OccAutocomplete($text: String!) { \
occAutocomplete(text: $text) { id label } }";

const SALARY_OPERATION: &str = "EmpSalaries";
const SALARY_QUERY: &str = "query EmpSalaries($employerId: Int!, $jobTitleId: Int!, \
$jobTitle: String!, $locationId: Int!, $locationType: String!, $pageSize: Int!, \
$sortType: String!, $sortDescending: Boolean!, $payPeriod: String!) { \
salariesByEmployer(employerId: $employerId, jobTitleId: $jobTitleId, jobTitle: $jobTitle, \
locationId: $locationId, locationType: $locationType, pageSize: $pageSize, \
sortType: $sortType, sortDescending: $sortDescending, payPeriod: $payPeriod) { \
results { currency { code } salaryCount jobTitle { text } \
totalPayStatistics { percentiles { ident value } } } } }";

/// Resolved base URL plus prebuilt headers.
#[derive(Debug, Clone)]
struct Upstream {
    base_url: String,
    headers: HeaderMap,
}

impl Upstream {
    fn from_config(config: UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SalaryError::Configuration(format!("invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                SalaryError::Configuration(format!(
                    "invalid value for header '{}': {}",
                    name.as_str(),
                    e
                ))
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            base_url: config.base_url,
            headers,
        })
    }
}

// == HTTP Provider ==
/// Talks to the real provider over HTTP.
///
/// Upstream settings are validated once at construction. When they are
/// missing or invalid the provider still builds, but every call fails with
/// [`SalaryError::Configuration`] before touching the network.
#[derive(Debug, Clone)]
pub struct HttpSalaryProvider {
    http_client: ReqwestClient,
    upstream: std::result::Result<Upstream, String>,
    location_id: u64,
    source_name: String,
}

impl HttpSalaryProvider {
    pub fn new(config: &Config) -> Self {
        let upstream = config
            .upstream()
            .and_then(Upstream::from_config)
            .map_err(|e| match e {
                SalaryError::Configuration(message) => message,
                other => other.to_string(),
            });

        Self {
            http_client: ReqwestClient::new(),
            upstream,
            location_id: config.location_id,
            source_name: config.provider_name.clone(),
        }
    }

    /// Returns the configuration problem, if any.
    pub fn configuration_error(&self) -> Option<&str> {
        self.upstream.as_ref().err().map(String::as_str)
    }

    fn upstream(&self) -> Result<&Upstream> {
        self.upstream
            .as_ref()
            .map_err(|e| SalaryError::Configuration(e.clone()))
    }

    /// Sends one batched GraphQL operation and returns the `data` of the first
    /// response element.
    async fn graphql<T: DeserializeOwned>(&self, operation: GraphQlOperation<'_>) -> Result<T> {
        let upstream = self.upstream()?;
        let url = format!("{}{}", upstream.base_url, GRAPHQL_PATH);
        let operation_name = operation.operation_name;

        let response = self
            .http_client
            .post(&url)
            .headers(upstream.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&[operation])
            .send()
            .await?;

        let batch: Vec<GraphQlResponse<T>> = read_json(response).await?;
        let first = batch.into_iter().next().ok_or_else(|| {
            SalaryError::MalformedResponse(format!("{} returned an empty batch", operation_name))
        })?;

        match first.data {
            Some(data) => Ok(data),
            None => {
                let messages: Vec<&str> = first.errors.iter().map(|e| e.message.as_str()).collect();
                Err(SalaryError::MalformedResponse(format!(
                    "{} returned no data: {}",
                    operation_name,
                    messages.join("; ")
                )))
            }
        }
    }
}

/// Checks the status and decodes the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error response".to_string());
        return Err(SalaryError::UpstreamTransport {
            status: Some(status.as_u16()),
            message: body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl SalaryProvider for HttpSalaryProvider {
    #[instrument(skip(self))]
    async fn search_companies(&self, name: &str) -> Result<Vec<Company>> {
        let upstream = self.upstream()?;
        let url = Url::parse_with_params(
            &format!("{}{}", upstream.base_url, COMPANY_SEARCH_PATH),
            &[
                ("autocomplete", "true"),
                ("maxEmployersForAutocomplete", "10"),
                ("term", name),
            ],
        )
        .map_err(|e| SalaryError::Configuration(format!("invalid base URL: {}", e)))?;

        info!("Searching upstream for company");
        let response = self
            .http_client
            .get(url)
            .headers(upstream.headers.clone())
            .send()
            .await?;

        let envelope: CompanySearchEnvelope = read_json(response).await?;
        let employers = envelope.json.response.employers;
        debug!(count = employers.len(), "Company search returned");
        Ok(employers)
    }

    #[instrument(skip(self))]
    async fn search_job_titles(&self, title: &str) -> Result<Vec<JobTitle>> {
        info!("Searching upstream for job title");
        let data: OccAutocompleteData = self
            .graphql(GraphQlOperation {
                operation_name: JOB_TITLE_OPERATION,
                variables: json!({ "text": title }),
                query: JOB_TITLE_QUERY,
            })
            .await?;

        debug!(count = data.suggestions.len(), "Job title search returned");
        Ok(data.suggestions)
    }

    #[instrument(skip(self))]
    async fn fetch_salaries(&self, query: &SalaryQuery) -> Result<Vec<SalaryRecord>> {
        info!("Fetching salaries from upstream");
        let data: EmployerSalariesData = self
            .graphql(GraphQlOperation {
                operation_name: SALARY_OPERATION,
                variables: json!({
                    "employerId": query.company_id,
                    "jobTitleId": query.job_title_id,
                    "jobTitle": query.job_title,
                    "locationId": self.location_id,
                    "locationType": "COUNTRY",
                    "pageSize": 1,
                    "sortType": "COUNT",
                    "sortDescending": true,
                    "payPeriod": "ANNUAL",
                }),
                query: SALARY_QUERY,
            })
            .await?;

        let results = data.salaries_by_employer.results;
        debug!(count = results.len(), "Salary query returned");
        Ok(results)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}
