//! RBAC API surface
//!
//! [`RbacApi`] is the seam between the role editor and the backend. The HTTP
//! implementation below maps each call onto one REST request.

use async_trait::async_trait;

use crate::{
    ClientResult, HttpClient, ModuleCount, Permission, PermissionId, PermissionPayload,
    PermissionQuery, Role, RoleId, RolePayload,
};

/// Role and permission endpoints
#[async_trait]
pub trait RbacApi: Send + Sync {
    /// `GET /permissions/`
    async fn list_permissions(&self, query: &PermissionQuery) -> ClientResult<Vec<Permission>>;

    /// `GET /permissions/modules`
    async fn permission_modules(&self) -> ClientResult<Vec<ModuleCount>>;

    /// `POST /permissions/`
    async fn create_permission(&self, payload: &PermissionPayload) -> ClientResult<Permission>;

    /// `PUT /permissions/{id}`
    async fn update_permission(
        &self,
        id: PermissionId,
        payload: &PermissionPayload,
    ) -> ClientResult<Permission>;

    /// `DELETE /permissions/{id}`
    async fn delete_permission(&self, id: PermissionId) -> ClientResult<()>;

    /// `GET /roles/`
    async fn list_roles(&self) -> ClientResult<Vec<Role>>;

    /// `GET /roles/{id}`
    async fn get_role(&self, id: RoleId) -> ClientResult<Role>;

    /// `POST /roles/`
    async fn create_role(&self, payload: &RolePayload) -> ClientResult<Role>;

    /// `PUT /roles/{id}`
    async fn update_role(&self, id: RoleId, payload: &RolePayload) -> ClientResult<Role>;

    /// `DELETE /roles/{id}`
    async fn delete_role(&self, id: RoleId) -> ClientResult<()>;
}

#[async_trait]
impl RbacApi for HttpClient {
    async fn list_permissions(&self, query: &PermissionQuery) -> ClientResult<Vec<Permission>> {
        self.get_with_query("/permissions/", &query.pairs()).await
    }

    async fn permission_modules(&self) -> ClientResult<Vec<ModuleCount>> {
        self.get("/permissions/modules").await
    }

    async fn create_permission(&self, payload: &PermissionPayload) -> ClientResult<Permission> {
        tracing::info!(code = %payload.code, "Creating permission");
        self.post("/permissions/", payload).await
    }

    async fn update_permission(
        &self,
        id: PermissionId,
        payload: &PermissionPayload,
    ) -> ClientResult<Permission> {
        tracing::info!(permission_id = id, code = %payload.code, "Updating permission");
        self.put(&format!("/permissions/{}", id), payload).await
    }

    async fn delete_permission(&self, id: PermissionId) -> ClientResult<()> {
        tracing::info!(permission_id = id, "Deleting permission");
        self.delete(&format!("/permissions/{}", id)).await
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.get("/roles/").await
    }

    async fn get_role(&self, id: RoleId) -> ClientResult<Role> {
        self.get(&format!("/roles/{}", id)).await
    }

    async fn create_role(&self, payload: &RolePayload) -> ClientResult<Role> {
        tracing::info!(
            role_name = %payload.name,
            permission_count = payload.permission_ids.len(),
            "Creating role"
        );
        self.post("/roles/", payload).await
    }

    async fn update_role(&self, id: RoleId, payload: &RolePayload) -> ClientResult<Role> {
        tracing::info!(
            role_id = id,
            permission_count = payload.permission_ids.len(),
            "Updating role"
        );
        self.put(&format!("/roles/{}", id), payload).await
    }

    async fn delete_role(&self, id: RoleId) -> ClientResult<()> {
        tracing::info!(role_id = id, "Deleting role");
        self.delete(&format!("/roles/{}", id)).await
    }
}
