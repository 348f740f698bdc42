use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far a search reaches in the branch tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SearchType {
    #[default]
    AllBranches = 1,
    CurrentBranch = 2,
    CurrentAndDescendants = 3,
}

impl SearchType {
    pub const ALL: [SearchType; 3] = [
        SearchType::AllBranches,
        SearchType::CurrentBranch,
        SearchType::CurrentAndDescendants,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchType::AllBranches => "All branches",
            SearchType::CurrentBranch => "Current branch",
            SearchType::CurrentAndDescendants => "Current and sub-branches",
        }
    }
}

impl From<SearchType> for u8 {
    fn from(search_type: SearchType) -> Self {
        search_type as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown search type {0}")]
pub struct InvalidSearchType(pub u8);

impl TryFrom<u8> for SearchType {
    type Error = InvalidSearchType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SearchType::AllBranches),
            2 => Ok(SearchType::CurrentBranch),
            3 => Ok(SearchType::CurrentAndDescendants),
            other => Err(InvalidSearchType(other)),
        }
    }
}

/// Free-text search plus its scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub text: String,
    pub search_type: SearchType,
}

impl SearchState {
    /// The trimmed search text, if any.
    pub fn query(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub attr: Option<String>,
    pub direction: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_type_serializes_as_number() {
        assert_eq!(
            serde_json::to_string(&SearchType::CurrentAndDescendants).unwrap(),
            "3"
        );
        assert_eq!(
            serde_json::from_str::<SearchType>("2").unwrap(),
            SearchType::CurrentBranch
        );
    }

    #[test]
    fn unknown_search_type_is_rejected() {
        assert!(serde_json::from_str::<SearchType>("4").is_err());
        assert_eq!(SearchType::try_from(0), Err(InvalidSearchType(0)));
        assert_eq!(InvalidSearchType(7).to_string(), "unknown search type 7");
    }

    #[test]
    fn blank_search_text_is_no_query() {
        let mut search = SearchState {
            text: "   ".into(),
            ..Default::default()
        };
        assert_eq!(search.query(), None);

        search.text = "  emea ".into();
        assert_eq!(search.query(), Some("emea"));

        search.clear();
        assert!(search.text.is_empty());
    }
}
