//! Lookup Pipeline
//!
//! Cached company, job title and salary lookups, and the orchestrator that
//! chains them into a [`SalaryInfo`].

mod result;
mod service;

pub use result::{CompanySummary, JobSummary, SalaryFigures, SalaryInfo};
pub use service::SalaryService;
