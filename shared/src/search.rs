use std::fmt;

use crate::shelter::Shelter;

/// Case-sensitive substring match over name and address.
/// The empty query matches every shelter.
pub fn search_database<'a>(shelters: &'a [Shelter], query: &str) -> Vec<&'a Shelter> {
    shelters
        .iter()
        .filter(|shelter| shelter.name.contains(query) || shelter.address.contains(query))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The search input element is not on the page.
    MissingInput,
    /// The query is empty or whitespace only.
    EmptyQuery,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => f.write_str("search input is not available"),
            Self::EmptyQuery => f.write_str("search query is empty"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Accept a raw input value for searching. Returns the trimmed query.
pub fn validate_query(raw: Option<&str>) -> Result<&str, SearchError> {
    let query = raw.ok_or(SearchError::MissingInput)?.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(query)
}
