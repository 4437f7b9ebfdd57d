//! Request and Response models for the salary API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ClearParams, SalaryParams, SalaryRequest, DEFAULT_LOCATION};
pub use responses::{ClearResponse, HealthResponse, SalaryResponse};
