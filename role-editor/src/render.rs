//! Plain-text rendering of the permission grid

use std::fmt::Write;

use crate::STANDARD_ACTIONS;
use crate::catalog::{ActionGroup, ActionState};
use crate::editor::PermissionEditor;

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn action_mark(group: &ActionGroup) -> &'static str {
    if !group.is_enabled() {
        return " - ";
    }
    match group.state {
        ActionState::All => "[x]",
        ActionState::Some => "[~]",
        ActionState::None => "[ ]",
    }
}

/// Render the visible permissions, one block per module
///
/// Collapsed modules show only their header line.
pub fn render_grid(editor: &PermissionEditor) -> String {
    let grouped = editor.grouped();
    let mut out = String::new();

    if grouped.is_empty() {
        out.push_str("No permissions match the current filters.\n");
        return out;
    }

    for (module, perms) in grouped.iter() {
        let expanded = editor.is_expanded(module);
        let _ = write!(
            out,
            "{} {} ({})",
            if expanded { "v" } else { ">" },
            module,
            editor.module_tally(module)
        );
        for action in STANDARD_ACTIONS {
            let group = editor.action_state(module, action);
            let _ = write!(out, "  {}:{}", action, action_mark(&group));
        }
        out.push('\n');

        if expanded {
            for perm in perms {
                let _ = writeln!(
                    out,
                    "    {} {:<5} {:<32} {}",
                    checkbox(editor.selection().contains(perm.id)),
                    perm.id,
                    perm.code,
                    perm.label
                );
            }
        }
    }

    let _ = writeln!(
        out,
        "{} selected, {} shown in {} modules",
        editor.selection().len(),
        grouped.permission_count(),
        grouped.module_count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::editor::Draft;
    use crate::debounce::DEFAULT_QUIET;
    use shared::Permission;

    fn editor() -> PermissionEditor {
        let catalog = Catalog::new(vec![
            Permission::new(1, "billing.items.view", "View Items"),
            Permission::new(2, "billing.items.create", "Create Items"),
            Permission::new(3, "users.view", "View Users"),
        ]);
        let mut draft = Draft::blank();
        draft.selection.set(1, true);
        PermissionEditor::new(catalog, draft, DEFAULT_QUIET)
    }

    #[test]
    fn test_collapsed_modules_show_headers_only() {
        let text = render_grid(&editor());
        assert!(text.contains("> billing (1/2)"));
        assert!(text.contains("view:[x]"));
        assert!(text.contains("create:[ ]"));
        assert!(text.contains("delete: - "));
        assert!(!text.contains("billing.items.view"));
    }

    #[test]
    fn test_expanded_module_lists_rows() {
        let mut editor = editor();
        editor.toggle_expanded("billing");
        let text = render_grid(&editor);
        assert!(text.contains("v billing (1/2)"));
        assert!(text.contains("[x] 1"));
        assert!(text.contains("[ ] 2"));
        assert!(text.contains("> users (0/1)"));
        assert!(text.ends_with("1 selected, 3 shown in 2 modules\n"));
    }

    #[test]
    fn test_empty_view() {
        let mut editor = editor();
        editor.set_search("nothing matches this");
        assert_eq!(render_grid(&editor), "No permissions match the current filters.\n");
    }
}
