// role-editor/tests/common/mod.rs
// In-memory backend for session tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ward_client::{
    ClientError, ClientResult, ModuleCount, Permission, PermissionId, PermissionPayload,
    PermissionQuery, RbacApi, Role, RoleId, RolePayload,
};

#[derive(Default)]
pub struct MemoryApi {
    permissions: Mutex<Vec<Permission>>,
    roles: Mutex<Vec<Role>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
    next_id: Mutex<i64>,
}

impl MemoryApi {
    pub fn new(permissions: Vec<Permission>, roles: Vec<Role>) -> Self {
        Self {
            permissions: Mutex::new(permissions),
            roles: Mutex::new(roles),
            next_id: Mutex::new(100),
            ..Default::default()
        }
    }

    /// Catalog from the billing/users scenario plus a few clinical codes
    pub fn hospital() -> Self {
        Self::new(
            vec![
                Permission::new(1, "billing.items.view", "View Items"),
                Permission::new(2, "billing.items.create", "Create Items"),
                Permission::new(3, "users.view", "View Users"),
                Permission::new(4, "opd.visits.view", "View OPD Visits"),
                Permission::new(5, "pharmacy.stock.update", "Adjust Stock"),
            ],
            vec![Role {
                id: 7,
                name: "Nurse".into(),
                description: Some("Ward nurse".into()),
                permission_ids: vec![1, 2, 3],
            }],
        )
    }

    /// Make the next call to `endpoint` fail with `err`
    pub fn fail_next(&self, endpoint: &'static str, err: ClientError) {
        self.failures.lock().unwrap().insert(endpoint, err);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_writes(&self) -> usize {
        ["create_role", "update_role", "delete_role"]
            .iter()
            .map(|e| self.calls(e))
            .sum()
    }

    pub fn stored_role(&self, id: RoleId) -> Option<Role> {
        self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    fn record(&self, endpoint: &'static str) -> ClientResult<()> {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
        match self.failures.lock().unwrap().remove(endpoint) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RbacApi for MemoryApi {
    async fn list_permissions(&self, _query: &PermissionQuery) -> ClientResult<Vec<Permission>> {
        self.record("list_permissions")?;
        Ok(self.permissions.lock().unwrap().clone())
    }

    async fn permission_modules(&self) -> ClientResult<Vec<ModuleCount>> {
        self.record("permission_modules")?;
        Ok(Vec::new())
    }

    async fn create_permission(&self, payload: &PermissionPayload) -> ClientResult<Permission> {
        self.record("create_permission")?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let perm = Permission::new(*next_id, payload.code.clone(), payload.label.clone());
        self.permissions.lock().unwrap().push(perm.clone());
        Ok(perm)
    }

    async fn update_permission(
        &self,
        id: PermissionId,
        payload: &PermissionPayload,
    ) -> ClientResult<Permission> {
        self.record("update_permission")?;
        Ok(Permission::new(id, payload.code.clone(), payload.label.clone()))
    }

    async fn delete_permission(&self, id: PermissionId) -> ClientResult<()> {
        self.record("delete_permission")?;
        self.permissions.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.record("list_roles")?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn get_role(&self, id: RoleId) -> ClientResult<Role> {
        self.record("get_role")?;
        self.stored_role(id)
            .ok_or_else(|| ClientError::NotFound(format!("Role {}", id)))
    }

    async fn create_role(&self, payload: &RolePayload) -> ClientResult<Role> {
        self.record("create_role")?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let role = Role {
            id: *next_id,
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            permission_ids: payload.permission_ids.clone(),
        };
        self.roles.lock().unwrap().push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: RoleId, payload: &RolePayload) -> ClientResult<Role> {
        self.record("update_role")?;
        let mut roles = self.roles.lock().unwrap();
        let role = roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Role {}", id)))?;
        role.name = payload.name.clone();
        role.description = Some(payload.description.clone());
        role.permission_ids = payload.permission_ids.clone();
        Ok(role.clone())
    }

    async fn delete_role(&self, id: RoleId) -> ClientResult<()> {
        self.record("delete_role")?;
        self.roles.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}
