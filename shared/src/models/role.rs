//! Role Model

use serde::{Deserialize, Serialize};

use super::permission::PermissionId;

/// Role identifier
pub type RoleId = i64;

/// Role entity (named permission bundle)
///
/// `permission_ids` is logically a set. Ids are trusted from the backend and
/// may reference permissions that no longer exist in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<PermissionId>,
}

/// Create/update role payload (replace semantics for `permission_ids`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    pub description: String,
    pub permission_ids: Vec<PermissionId>,
}
