//! Permission catalog: filtering, grouping and per-module aggregates
//!
//! The catalog is immutable reference data for one editor session. Views are
//! computed on demand from a [`PermissionFilter`] and the current
//! [`Selection`]; nothing here mutates either.
//!
//! Two populations are in play:
//! - the *visible* set, which passes every filter (search, module, selected-only)
//! - a module's *full* set, which ignores the filters entirely
//!
//! Badges and module/action toggles work on the full set so a narrowed search
//! never changes what "select all in billing" means.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use shared::{ModuleCount, Permission, PermissionId};

use crate::selection::Selection;

/// Module restriction for the visible set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModuleFilter {
    #[default]
    All,
    Only(String),
}

impl ModuleFilter {
    /// `"all"` (or empty) means no restriction
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            module => Self::Only(module.to_string()),
        }
    }

    fn admits(&self, module: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == module,
        }
    }
}

/// Filter state driving the visible set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    pub module: ModuleFilter,
    /// Case-insensitive substring over `label` and `code`
    pub search: String,
    pub selected_only: bool,
}

impl PermissionFilter {
    pub fn matches(&self, perm: &Permission, selection: &Selection) -> bool {
        self.matches_needle(perm, selection, &self.search.to_lowercase())
    }

    /// `needle` is the search text already lower-cased
    fn matches_needle(&self, perm: &Permission, selection: &Selection, needle: &str) -> bool {
        if !needle.is_empty() {
            let haystack = format!("{} {}", perm.label, perm.code).to_lowercase();
            if !haystack.contains(needle) {
                return false;
            }
        }
        if !self.module.admits(perm.module()) {
            return false;
        }
        if self.selected_only && !selection.contains(perm.id) {
            return false;
        }
        true
    }
}

/// Selected/total badge for a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleTally {
    pub selected: usize,
    pub total: usize,
}

impl fmt::Display for ModuleTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.selected, self.total)
    }
}

/// Three-state value of a per-action toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    None,
    Some,
    All,
}

/// Per-module, per-action toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionGroup {
    pub state: ActionState,
    pub selected: usize,
    pub total: usize,
}

impl ActionGroup {
    fn from_counts(selected: usize, total: usize) -> Self {
        let state = if total == 0 || selected == 0 {
            ActionState::None
        } else if selected == total {
            ActionState::All
        } else {
            ActionState::Some
        };
        Self { state, selected, total }
    }

    /// A module without permissions for this action has a disabled control
    pub fn is_enabled(&self) -> bool {
        self.total > 0
    }
}

/// Visible permissions grouped by module, modules in ascending order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct GroupedView<'a> {
    groups: BTreeMap<&'a str, Vec<&'a Permission>>,
}

impl<'a> GroupedView<'a> {
    pub fn module_keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    pub fn get(&self, module: &str) -> Option<&[&'a Permission]> {
        self.groups.get(module).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Permission])> + '_ {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of modules
    pub fn module_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of permissions across all groups
    pub fn permission_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Full permission catalog for one editor session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    permissions: Vec<Permission>,
    index: HashMap<PermissionId, usize>,
}

impl Catalog {
    pub fn new(permissions: Vec<Permission>) -> Self {
        let mut index = HashMap::with_capacity(permissions.len());
        for (pos, perm) in permissions.iter().enumerate() {
            index.entry(perm.id).or_insert(pos);
        }
        Self { permissions, index }
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    pub fn get(&self, id: PermissionId) -> Option<&Permission> {
        self.index.get(&id).map(|&pos| &self.permissions[pos])
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.code == code)
    }

    /// Distinct modules with their sizes, ascending by name
    pub fn modules(&self) -> Vec<ModuleCount> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for perm in &self.permissions {
            *counts.entry(perm.module()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(module, count)| ModuleCount {
                module: module.to_string(),
                count,
            })
            .collect()
    }

    /// Full population of a module, filters ignored
    pub fn module_members<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Permission> {
        self.permissions.iter().filter(move |p| p.module() == module)
    }

    /// Full population of a module restricted to one action
    pub fn action_members<'a>(
        &'a self,
        module: &'a str,
        action: &'a str,
    ) -> impl Iterator<Item = &'a Permission> {
        self.module_members(module)
            .filter(move |p| p.action() == action)
    }

    /// Permissions passing every filter, in catalog order
    pub fn visible(&self, filter: &PermissionFilter, selection: &Selection) -> Vec<&Permission> {
        let needle = filter.search.to_lowercase();
        self.permissions
            .iter()
            .filter(|p| filter.matches_needle(p, selection, &needle))
            .collect()
    }

    /// Visible permissions sorted by (module, label, code) and grouped by module
    pub fn grouped(&self, filter: &PermissionFilter, selection: &Selection) -> GroupedView<'_> {
        let mut visible = self.visible(filter, selection);
        visible.sort_by(|a, b| {
            (a.module(), a.label.as_str(), a.code.as_str(), a.id)
                .cmp(&(b.module(), b.label.as_str(), b.code.as_str(), b.id))
        });

        let mut groups: BTreeMap<&str, Vec<&Permission>> = BTreeMap::new();
        for perm in visible {
            groups.entry(perm.module()).or_default().push(perm);
        }
        GroupedView { groups }
    }

    /// Selected/total over the module's full population
    ///
    /// Selected ids missing from the catalog are not counted.
    pub fn module_tally(&self, module: &str, selection: &Selection) -> ModuleTally {
        let (selected, total) = count(self.module_members(module), selection);
        ModuleTally { selected, total }
    }

    pub fn action_state(&self, module: &str, action: &str, selection: &Selection) -> ActionGroup {
        let (selected, total) = count(self.action_members(module, action), selection);
        ActionGroup::from_counts(selected, total)
    }
}

fn count<'a>(perms: impl Iterator<Item = &'a Permission>, selection: &Selection) -> (usize, usize) {
    perms.fold((0, 0), |(selected, total), perm| {
        (selected + usize::from(selection.contains(perm.id)), total + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Permission::new(1, "billing.items.view", "View Items"),
            Permission::new(2, "billing.items.create", "Create Items"),
            Permission::new(3, "users.view", "View Users"),
            Permission::new(4, "settings", "Settings"),
            Permission::new(5, "billing.invoices.view", "View Invoices"),
            Permission::new(6, "lab.results.esign", "E-sign Results"),
        ])
    }

    fn ids(perms: &[&Permission]) -> Vec<PermissionId> {
        perms.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let catalog = sample();
        let view = catalog.grouped(&PermissionFilter::default(), &Selection::new());
        assert_eq!(view.permission_count(), catalog.len());
        assert_eq!(
            view.module_keys().collect::<Vec<_>>(),
            vec!["billing", "general", "lab", "users"]
        );
    }

    #[test]
    fn test_group_sorted_by_label_then_code() {
        let catalog = sample();
        let view = catalog.grouped(&PermissionFilter::default(), &Selection::new());
        // Create Items < View Invoices < View Items
        assert_eq!(ids(view.get("billing").unwrap()), vec![2, 5, 1]);
    }

    #[test]
    fn test_ties_are_deterministic() {
        let catalog = Catalog::new(vec![
            Permission::new(9, "ward.beds.view", "Beds"),
            Permission::new(8, "ward.beds.view", "Beds"),
            Permission::new(7, "ward.beds.assign", "Beds"),
        ]);
        let view = catalog.grouped(&PermissionFilter::default(), &Selection::new());
        assert_eq!(ids(view.get("ward").unwrap()), vec![7, 8, 9]);
    }

    #[test]
    fn test_search_matches_label_or_code_case_insensitive() {
        let catalog = sample();
        let filter = PermissionFilter {
            search: "ITEMS".into(),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.visible(&filter, &Selection::new())), vec![1, 2]);

        let filter = PermissionFilter {
            search: "e-sign".into(),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.visible(&filter, &Selection::new())), vec![6]);
    }

    #[test]
    fn test_visible_agrees_with_matches() {
        let catalog = sample();
        let selection: Selection = [1, 6].into_iter().collect();
        let filter = PermissionFilter {
            search: "ViEw".into(),
            selected_only: true,
            ..Default::default()
        };
        let one_by_one: Vec<PermissionId> = catalog
            .iter()
            .filter(|p| filter.matches(p, &selection))
            .map(|p| p.id)
            .collect();
        assert_eq!(ids(&catalog.visible(&filter, &selection)), one_by_one);
        assert_eq!(one_by_one, vec![1]);
    }

    #[test]
    fn test_search_spans_label_and_code_boundary() {
        let catalog = sample();
        let filter = PermissionFilter {
            search: "users users.view".into(),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.visible(&filter, &Selection::new())), vec![3]);
    }

    #[test]
    fn test_module_filter() {
        let catalog = sample();
        let filter = PermissionFilter {
            module: ModuleFilter::parse("billing"),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.visible(&filter, &Selection::new())), vec![1, 2, 5]);
        assert_eq!(ModuleFilter::parse("all"), ModuleFilter::All);
    }

    #[test]
    fn test_selected_only() {
        let catalog = sample();
        let selection: Selection = [3, 6, 42].into_iter().collect();
        let filter = PermissionFilter {
            selected_only: true,
            ..Default::default()
        };
        let view = catalog.grouped(&filter, &selection);
        assert_eq!(view.module_keys().collect::<Vec<_>>(), vec!["lab", "users"]);
        assert_eq!(view.permission_count(), 2);
    }

    #[test]
    fn test_every_permission_in_exactly_one_group() {
        let catalog = sample();
        let view = catalog.grouped(&PermissionFilter::default(), &Selection::new());
        let mut seen: Vec<PermissionId> = view.iter().flat_map(|(_, perms)| ids(perms)).collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);

        let distinct: Vec<String> = catalog.modules().into_iter().map(|m| m.module).collect();
        assert!(view.module_keys().all(|k| distinct.iter().any(|m| m == k)));
    }

    #[test]
    fn test_tally_ignores_search_and_stale_ids() {
        let catalog = sample();
        let selection: Selection = [1, 99].into_iter().collect();
        let tally = catalog.module_tally("billing", &selection);
        assert_eq!(tally, ModuleTally { selected: 1, total: 3 });
        assert_eq!(tally.to_string(), "1/3");
    }

    #[test]
    fn test_action_state() {
        let catalog = sample();
        let mut selection = Selection::new();

        let group = catalog.action_state("billing", "view", &selection);
        assert_eq!(group.state, ActionState::None);
        assert_eq!(group.total, 2);

        selection.set(1, true);
        assert_eq!(catalog.action_state("billing", "view", &selection).state, ActionState::Some);

        selection.set(5, true);
        assert_eq!(catalog.action_state("billing", "view", &selection).state, ActionState::All);
    }

    #[test]
    fn test_empty_action_group_disabled() {
        let catalog = sample();
        let group = catalog.action_state("users", "delete", &Selection::new());
        assert_eq!(group.state, ActionState::None);
        assert!(!group.is_enabled());
    }

    #[test]
    fn test_undotted_code_matches_action_named_like_it() {
        let catalog = Catalog::new(vec![Permission::new(1, "view", "Plain view")]);
        let group = catalog.action_state("general", "view", &Selection::new());
        assert_eq!(group.total, 1);
    }

    #[test]
    fn test_modules_with_counts() {
        let modules = sample().modules();
        assert_eq!(modules[0], ModuleCount { module: "billing".into(), count: 3 });
        assert_eq!(modules.len(), 4);
    }

    #[test]
    fn test_get_and_find() {
        let catalog = sample();
        assert_eq!(catalog.get(3).map(|p| p.code.as_str()), Some("users.view"));
        assert!(catalog.get(99).is_none());
        assert_eq!(catalog.find_by_code("settings").map(|p| p.id), Some(4));
    }
}
