//! Query combinations - the unit of work the planner emits.

use std::fmt;

/// One (keyword, location) pair to search.
///
/// Ephemeral: produced by the planner, consumed once per run, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCombination {
    pub keyword: String,
    pub location: String,
}

impl QueryCombination {
    /// Create a new combination.
    pub fn new(keyword: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            location: location.into(),
        }
    }

    /// The free-text query string sent to the provider.
    pub fn query_string(&self) -> String {
        format!("{} in {}", self.keyword, self.location)
    }
}

impl fmt::Display for QueryCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.keyword, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_format() {
        let combo = QueryCombination::new("Software Engineer Intern", "Silicon Valley, CA");
        assert_eq!(
            combo.query_string(),
            "Software Engineer Intern in Silicon Valley, CA"
        );
    }
}
