//! Shared types for the ward admin tools
//!
//! Wire models exchanged with the hospital backend and the permission code
//! convention used by every consumer to derive modules and actions.

pub mod code;
pub mod models;

// Re-exports
pub use code::{FALLBACK_MODULE, action_of, module_of};
pub use models::{
    ModuleCount, Permission, PermissionId, PermissionPayload, PermissionQuery, Role, RoleId,
    RolePayload,
};
pub use serde::{Deserialize, Serialize};
