use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    NavigationNode, NodeId,
    validation::{FieldSchema, Rule},
};

/// A node of the organisational tree ("haykal").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub users_count: Option<u64>,
}

impl From<&Branch> for NavigationNode {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id.clone(),
            title: branch.title.clone(),
            code: branch.code.clone(),
            has_children: branch.has_children,
        }
    }
}

impl From<Branch> for NavigationNode {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            title: branch.title,
            code: branch.code,
            has_children: branch.has_children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: NodeId,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Title of the branch the user belongs to.
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members_count: u64,
    /// Membership is computed from rules instead of assigned by hand.
    #[serde(default)]
    pub rule_based: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Date,
    Select,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Number => "Number",
            FieldKind::Date => "Date",
            FieldKind::Select => "Select",
        }
    }
}

/// A tenant-defined extra attribute on user profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserField {
    pub id: NodeId,
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl UserField {
    pub fn field_schema(&self) -> FieldSchema {
        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        if self.required && !self.rules.contains(&Rule::Required) {
            rules.push(Rule::Required);
        }
        rules.extend(self.rules.iter().cloned());

        FieldSchema {
            name: self.key.clone(),
            label: self.label.clone(),
            rules,
        }
    }
}

/// Tenant branding shown in the console chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSettings {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<Url>,
    #[serde(default)]
    pub primary_color: Option<String>,
}

/// Everything the console shell loads once before rendering a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    pub tenant: TenantSettings,
    pub default_page_size: usize,
}

/// Payload of the create-user drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub branch_id: Option<NodeId>,
}
