use serde::{Deserialize, Serialize};

use crate::{
    NodeId, PaginationState, SearchState, SearchType, SortDirection, SortState,
};

/// Parameters of one remote listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// One-based page number.
    pub page: usize,
    pub page_size: usize,
    pub search: Option<String>,
    pub sort_attr: Option<String>,
    pub sort_dir: SortDirection,
    pub scope_id: Option<NodeId>,
    pub search_type: SearchType,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(&PaginationState::default(), &SearchState::default(), &SortState::default(), None)
    }
}

impl ListQuery {
    pub fn new(
        pagination: &PaginationState,
        search: &SearchState,
        sort: &SortState,
        scope_id: Option<NodeId>,
    ) -> Self {
        Self {
            page: pagination.request_page(),
            page_size: pagination.page_size,
            search: search.query().map(str::to_string),
            sort_attr: sort.attr.clone(),
            sort_dir: sort.direction,
            scope_id,
            search_type: search.search_type,
        }
    }

    pub fn with_page_size_limit(mut self, max: usize) -> Self {
        self.page_size = self.page_size.clamp(1, max.max(1));
        self
    }

    /// Query-string pairs for the backend. `scope_key` names the scope
    /// parameter, which differs per listing (`parent_id`, `branch_id`, ...).
    pub fn to_params(&self, scope_key: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];

        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }

        if let Some(attr) = &self.sort_attr {
            params.push(("sort_attr".to_string(), attr.clone()));
            params.push(("sort_dir".to_string(), self.sort_dir.as_str().to_string()));
        }

        if let Some(scope) = &self.scope_id {
            params.push((scope_key.to_string(), scope.to_string()));
        }

        params.push((
            "search_type".to_string(),
            u8::from(self.search_type).to_string(),
        ));

        params
    }
}
