//! Cache Key Module
//!
//! Namespaced key generation. Every key is `<namespace>:<part>[:<part>...]`
//! with each part trimmed and lowercased.

use std::fmt;

/// Separator between the namespace tag and each key part.
pub const KEY_DELIMITER: char = ':';

// == Namespace ==
/// Leading tag of a cache key, identifying what kind of value it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Composed salary result for a company + job title pair
    Salary,
    /// Company search results for a company name
    Company,
    /// Job title suggestions for a job title
    Job,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Salary => "salary",
            Namespace::Company => "company",
            Namespace::Job => "job",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Make Key ==
/// Builds a namespaced key from one or more identifiers.
///
/// Equal inputs after trim + lowercase produce equal keys, whatever their
/// original casing or surrounding whitespace.
pub fn make_key<S: AsRef<str>>(namespace: Namespace, parts: &[S]) -> String {
    let mut key = String::from(namespace.as_str());
    for part in parts {
        key.push(KEY_DELIMITER);
        key.push_str(&part.as_ref().trim().to_lowercase());
    }
    key
}

/// Returns the namespace segment of a key (everything before the first delimiter).
pub fn namespace_of(key: &str) -> &str {
    key.split(KEY_DELIMITER).next().unwrap_or(key)
}
