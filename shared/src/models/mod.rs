//! Data models
//!
//! Shapes returned by and sent to the backend `/permissions` and `/roles`
//! endpoints. All IDs are `i64`.

pub mod permission;
pub mod role;

// Re-exports
pub use permission::*;
pub use role::*;
