//! Draft editor
//!
//! [`PermissionEditor`] owns one session's catalog, the working [`Draft`] and
//! the view state (filters, expanded modules, pending search input). Every
//! mutation touches the draft only; the backend sees it on save.
//!
//! There are three distinct "select many" scopes and each has its own method:
//! - [`PermissionEditor::set_visible_selection`]: what passes the filters
//! - [`PermissionEditor::set_module_selection`]: a module's full population
//! - [`PermissionEditor::toggle_module_action`]: one action within a module

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use shared::{ModuleCount, Permission, PermissionId, Role, RolePayload};

use crate::catalog::{ActionGroup, Catalog, GroupedView, ModuleFilter, ModuleTally, PermissionFilter};
use crate::debounce::Debouncer;
use crate::error::{EditorError, EditorResult};
use crate::preset::{self, Preset};
use crate::selection::Selection;

/// Working copy of a role
///
/// Built by value from the source role, so edits never reach the role list
/// until a save succeeds and the list is refetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub selection: Selection,
}

impl Draft {
    /// Empty draft for a new role
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            selection: role.permission_ids.iter().copied().collect(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Full replacement payload
    pub fn to_payload(&self) -> RolePayload {
        RolePayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            permission_ids: self.selection.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PermissionEditor {
    catalog: Catalog,
    draft: Draft,
    filter: PermissionFilter,
    expanded: BTreeSet<String>,
    search_input: Debouncer<String>,
}

impl PermissionEditor {
    /// Editor with default view state
    pub fn new(catalog: Catalog, draft: Draft, search_quiet: Duration) -> Self {
        Self {
            catalog,
            draft,
            filter: PermissionFilter::default(),
            expanded: BTreeSet::new(),
            search_input: Debouncer::new(search_quiet),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn selection(&self) -> &Selection {
        &self.draft.selection
    }

    pub fn filter(&self) -> &PermissionFilter {
        &self.filter
    }

    // ========== Draft fields ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    // ========== Filters ==========

    pub fn set_module_filter(&mut self, module: ModuleFilter) {
        self.filter.module = module;
    }

    /// Apply a search immediately, dropping any pending keystrokes
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_input.cancel();
        self.filter.search = query.into();
    }

    /// Record search input; it takes effect on a later [`Self::tick`]
    pub fn type_search(&mut self, query: impl Into<String>, now: Instant) {
        self.search_input.push(query.into(), now);
    }

    /// Apply debounced search input if its quiet period has passed
    ///
    /// Returns `true` when the filter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(query) if query != self.filter.search => {
                self.filter.search = query;
                true
            }
            _ => false,
        }
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    pub fn set_selected_only(&mut self, selected_only: bool) {
        self.filter.selected_only = selected_only;
    }

    // ========== Expand / collapse ==========

    /// Flip a module's expanded state, returning the new state
    pub fn toggle_expanded(&mut self, module: &str) -> bool {
        if self.expanded.remove(module) {
            false
        } else {
            self.expanded.insert(module.to_string());
            true
        }
    }

    pub fn is_expanded(&self, module: &str) -> bool {
        self.expanded.contains(module)
    }

    pub fn expand_all(&mut self) {
        self.expanded = self.catalog.modules().into_iter().map(|m| m.module).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    // ========== Views ==========

    pub fn visible(&self) -> Vec<&Permission> {
        self.catalog.visible(&self.filter, &self.draft.selection)
    }

    pub fn grouped(&self) -> GroupedView<'_> {
        self.catalog.grouped(&self.filter, &self.draft.selection)
    }

    pub fn modules(&self) -> Vec<ModuleCount> {
        self.catalog.modules()
    }

    pub fn module_tally(&self, module: &str) -> ModuleTally {
        self.catalog.module_tally(module, &self.draft.selection)
    }

    pub fn action_state(&self, module: &str, action: &str) -> ActionGroup {
        self.catalog.action_state(module, action, &self.draft.selection)
    }

    /// Selected ids that the catalog does not know
    pub fn stale_ids(&self) -> Vec<PermissionId> {
        self.draft
            .selection
            .iter()
            .filter(|id| !self.catalog.contains(*id))
            .collect()
    }

    // ========== Selection mutations ==========

    pub fn toggle_permission(&mut self, id: PermissionId) -> bool {
        self.draft.selection.toggle(id)
    }

    /// Set one permission, looked up by code
    pub fn set_permission_by_code(&mut self, code: &str, checked: bool) -> EditorResult<()> {
        let id = self
            .catalog
            .find_by_code(code)
            .map(|p| p.id)
            .ok_or_else(|| EditorError::UnknownPermission(code.to_string()))?;
        self.draft.selection.set(id, checked);
        Ok(())
    }

    /// Select or clear exactly the permissions currently visible
    pub fn set_visible_selection(&mut self, checked: bool) {
        let ids: Vec<PermissionId> = self.visible().into_iter().map(|p| p.id).collect();
        self.draft.selection.set_all(ids, checked);
    }

    /// Select or clear a module's full population, ignoring filters
    pub fn set_module_selection(&mut self, module: &str, checked: bool) {
        let ids: Vec<PermissionId> = self.catalog.module_members(module).map(|p| p.id).collect();
        self.draft.selection.set_all(ids, checked);
    }

    /// Select all of a module's permissions for `action`, or clear them when
    /// all are already selected
    ///
    /// A partial state resolves to select-all first.
    pub fn toggle_module_action(&mut self, module: &str, action: &str) {
        let ids: Vec<PermissionId> = self
            .catalog
            .action_members(module, action)
            .map(|p| p.id)
            .collect();
        if ids.is_empty() {
            return;
        }
        let all_selected = ids.iter().all(|id| self.draft.selection.contains(*id));
        self.draft.selection.set_all(ids, !all_selected);
    }

    pub fn clear_all_selection(&mut self) {
        self.draft.selection.clear();
    }

    /// Union a preset's matches over the whole catalog into the selection
    ///
    /// Returns how many ids were newly added.
    pub fn apply_preset(&mut self, preset: &Preset) -> usize {
        let before = self.draft.selection.len();
        let ids: Vec<PermissionId> = preset.select(self.catalog.iter()).map(|p| p.id).collect();
        self.draft.selection.extend(ids);
        let added = self.draft.selection.len() - before;
        tracing::debug!(preset = preset.key, added, "Applied preset");
        added
    }

    pub fn apply_preset_key(&mut self, key: &str) -> EditorResult<usize> {
        let preset = preset::find(key).ok_or_else(|| EditorError::UnknownPreset(key.to_string()))?;
        Ok(self.apply_preset(preset))
    }
}
