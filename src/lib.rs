//! Salary Lookup - salary estimates for a company and job title
//!
//! Resolves a company and a job title against an upstream salary data
//! provider, formats the pay percentiles and serves the result over HTTP.
//! A namespaced TTL cache sits in front of every upstream lookup.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, SalaryError};
pub use pipeline::{SalaryInfo, SalaryService};
pub use tasks::spawn_cleanup_task;
