//! Permission Model

use serde::{Deserialize, Serialize};

use crate::code::{action_of, module_of};

/// Permission identifier
pub type PermissionId = i64;

/// Permission entity (catalog reference data)
///
/// The backend may echo a `module` column, but grouping always uses the
/// module derived from `code` so the editor and the preset matcher agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl Permission {
    /// Create a permission with no stored module column
    pub fn new(id: PermissionId, code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            label: label.into(),
            module: None,
        }
    }

    /// Derived module (first code segment)
    pub fn module(&self) -> &str {
        module_of(&self.code)
    }

    /// Derived action (last code segment)
    pub fn action(&self) -> &str {
        action_of(&self.code)
    }
}

/// Module entry from `GET /permissions/modules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCount {
    pub module: String,
    pub count: u64,
}

/// Create/update permission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionPayload {
    pub code: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Server-side filter for `GET /permissions/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionQuery {
    /// Substring search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Exact module filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl PermissionQuery {
    /// Query for the whole catalog
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Query string pairs, omitting unset fields
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.q.as_deref() {
            pairs.push(("q", q));
        }
        if let Some(module) = self.module.as_deref() {
            pairs.push(("module", module));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_module_ignores_stored_column() {
        let perm: Permission = serde_json::from_str(
            r#"{"id": 4, "code": "billing.items.add", "label": "Add Items", "module": "finance"}"#,
        )
        .unwrap();
        assert_eq!(perm.module(), "billing");
        assert_eq!(perm.action(), "add");
        assert_eq!(perm.module.as_deref(), Some("finance"));
    }

    #[test]
    fn test_missing_label_defaults_empty() {
        let perm: Permission = serde_json::from_str(r#"{"id": 1, "code": "settings"}"#).unwrap();
        assert_eq!(perm.label, "");
        assert_eq!(perm.module(), "general");
    }

    #[test]
    fn test_query_pairs() {
        assert!(PermissionQuery::all().pairs().is_empty());

        let query = PermissionQuery::all().with_search("item").with_module("billing");
        assert_eq!(query.pairs(), vec![("q", "item"), ("module", "billing")]);
    }
}
