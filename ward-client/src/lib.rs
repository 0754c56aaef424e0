//! Ward Client - HTTP client for the hospital backend
//!
//! Provides network-based calls to the `/permissions` and `/roles` REST API
//! and the [`RbacApi`] trait the role editor is written against.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::RbacApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{
    ModuleCount, Permission, PermissionId, PermissionPayload, PermissionQuery, Role, RoleId,
    RolePayload,
};
