//! API Module
//!
//! HTTP handlers and routing for the salary service.
//!
//! # Endpoints
//! - `GET /api/salary` - Salary estimate for a company and job title
//! - `GET /api/cache/stats` - Cache statistics
//! - `DELETE /api/cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
