use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the branch tree.
///
/// The backend hands out numeric ids for most tenants, but some imports use
/// string keys, so both are accepted and serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl NodeId {
    /// The id of the tree root, which stands for "all branches".
    pub const ROOT: NodeId = NodeId::Int(1);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(id) => write!(f, "{id}"),
            NodeId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Int(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::Text(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId::Text(id)
    }
}

pub const ROOT_TITLE: &str = "Platform";

/// A visited node in the branch tree, as shown in breadcrumbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub has_children: bool,
}

impl NavigationNode {
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            code: None,
            has_children: false,
        }
    }

    /// The sentinel root every browsing session starts from.
    pub fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            title: ROOT_TITLE.to_string(),
            code: None,
            has_children: true,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// The id to scope remote queries by. The root means "no filter".
    pub fn scope_id(&self) -> Option<NodeId> {
        (!self.is_root()).then(|| self.id.clone())
    }
}
