mod entities;
mod error;
pub mod forms;
mod node;
mod pagination;
mod query;
mod search;
pub mod validation;

pub use entities::{Branch, ConsoleSettings, FieldKind, Group, NewUser, TenantSettings, User, UserField};
pub use error::{Error, Result};
pub use node::{NavigationNode, NodeId, ROOT_TITLE};
pub use pagination::{DEFAULT_PAGE_SIZE, PageMeta, Paginated, PaginationState};
pub use query::ListQuery;
pub use search::{InvalidSearchType, SearchState, SearchType, SortDirection, SortState};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
