//! Request DTOs for the salary API
//!
//! Query parameters accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::error::SalaryError;

/// Echoed back when the caller gives no location.
pub const DEFAULT_LOCATION: &str = "All locations";

/// Query string for `GET /api/salary`.
///
/// Every field is optional at the serde level so that a missing parameter
/// produces our own 400 message instead of the extractor's.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryParams {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub show_cache_stats: Option<String>,
}

/// Parameters after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRequest {
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub show_cache_stats: bool,
}

impl SalaryParams {
    /// Checks required parameters. `jobTitle` is checked before `companyName`,
    /// and an empty value counts as missing.
    pub fn validate(self) -> Result<SalaryRequest, SalaryError> {
        let job_title = required(self.job_title, "jobTitle")?;
        let company_name = required(self.company_name, "companyName")?;

        Ok(SalaryRequest {
            company_name,
            job_title,
            location: self
                .location
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            show_cache_stats: self.show_cache_stats.as_deref() == Some("true"),
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, SalaryError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SalaryError::InvalidRequest(format!("Missing required parameter: {}", name)))
}

/// Query string for `DELETE /api/cache`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearParams {
    pub prefix: Option<String>,
}
