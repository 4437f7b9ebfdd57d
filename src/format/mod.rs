//! Formatting Helpers
//!
//! Pure functions for cleaning search text and rendering salary amounts.

mod salary;
mod sanitize;

pub use salary::{currency_symbol, format_salary, NOT_AVAILABLE};
pub use sanitize::sanitize_name;
