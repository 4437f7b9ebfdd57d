//! Salary formatter: currency symbol plus South-Asian magnitude suffixes.

/// Rendered in place of an amount that is zero or missing.
pub const NOT_AVAILABLE: &str = "N/A";

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Returns the display symbol for an ISO currency code, or "" when unknown.
pub fn currency_symbol(code: &str) -> &'static str {
    match code {
        "INR" => "₹",
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        _ => "",
    }
}

/// Renders an amount as `<symbol><n>[ cr| lakh| k]`.
///
/// Thresholds are checked from the largest down. Scaled values round half
/// away from zero (`f64::round`), so 250,000 renders as 3 lakh. Zero, NaN
/// and missing amounts render as "N/A", which means a true zero salary is
/// indistinguishable from no data.
pub fn format_salary(amount: Option<f64>, currency: &str) -> String {
    let amount = match amount {
        Some(a) if a != 0.0 && !a.is_nan() => a,
        _ => return NOT_AVAILABLE.to_string(),
    };
    let symbol = currency_symbol(currency);

    if amount >= CRORE {
        format!("{}{} cr", symbol, (amount / CRORE).round())
    } else if amount >= LAKH {
        format!("{}{} lakh", symbol, (amount / LAKH).round())
    } else if amount >= THOUSAND {
        format!("{}{} k", symbol, (amount / THOUSAND).round())
    } else {
        format!("{}{}", symbol, amount.round())
    }
}
