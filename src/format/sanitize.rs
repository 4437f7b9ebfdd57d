//! Name sanitizer for free-text company names and job titles.

/// Cleans free text before it is used as a search term and cache key part.
///
/// Truncates at the first `,` or `(`, trims, then drops every character that
/// is neither alphanumeric nor whitespace.
pub fn sanitize_name(input: &str) -> String {
    let head = input.split([',', '(']).next().unwrap_or_default();

    head.trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}
