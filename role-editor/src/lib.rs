//! Role permission editor
//!
//! Client-side model of the role/permission assignment screen: the permission
//! catalog grouped by module, a draft selection with filtered, per-module and
//! per-action bulk operations, heuristic clinical presets, and the
//! open/save/delete lifecycle against the backend.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod logger;
pub mod notice;
pub mod preset;
pub mod render;
pub mod selection;
pub mod session;

pub use catalog::{
    ActionGroup, ActionState, Catalog, GroupedView, ModuleFilter, ModuleTally, PermissionFilter,
};
pub use config::EditorConfig;
pub use editor::{Draft, PermissionEditor};
pub use error::{EditorError, EditorResult};
pub use notice::{Notice, NoticeKind};
pub use preset::{PRESETS, Preset};
pub use render::render_grid;
pub use selection::Selection;
pub use session::{EditorMode, Phase, RoleEditorSession, Ticket};

/// Actions offered as per-module toggles
pub const STANDARD_ACTIONS: &[&str] = &["view", "create", "update", "delete"];
