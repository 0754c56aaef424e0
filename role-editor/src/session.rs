//! Role editor session
//!
//! Lifecycle of the modal editor around the outer role list:
//!
//! ```text
//! Closed ──open──> Loading ──loaded──> Open ──save──> Saving ──ok──> Closed (+ refetch)
//!                     │                 │  ^            └──err──> Open (draft intact)
//!                     └──load failed──> Closed
//!                                       │  └──cancel_delete── ConfirmingDelete
//!                                       ├──request_delete──────────^   │
//!                                       │                   confirm_delete
//!                                       │                              v
//!                                       │          Closed (+ refetch) <── Deleting ──err──> Open
//!                                       └──close──> Closed
//! ```
//!
//! Async work is split into `begin_*` / `finish_*` halves around the network
//! call. Each `begin_*` hands out a [`Ticket`] carrying the session generation;
//! `close` and every new `open` bump the generation, so a response that comes
//! back for an earlier generation is dropped instead of touching state. The
//! one-call methods (`open`, `save`, `confirm_delete`) compose both halves.

use std::sync::Arc;
use std::time::Duration;

use shared::{PermissionQuery, Role, RoleId, RolePayload};
use ward_client::{ClientError, ClientResult, RbacApi};

use crate::catalog::Catalog;
use crate::debounce::DEFAULT_QUIET;
use crate::editor::{Draft, PermissionEditor};
use crate::error::{EditorError, EditorResult};
use crate::notice::{NAME_REQUIRED_MESSAGE, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RoleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Loading,
    Open,
    Saving,
    ConfirmingDelete,
    Deleting,
}

/// Identity of an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    mode: EditorMode,
}

impl Ticket {
    pub fn mode(&self) -> EditorMode {
        self.mode
    }
}

/// Everything the editor needs before it can render
#[derive(Debug, Clone)]
pub struct Loaded {
    pub catalog: Catalog,
    pub draft: Draft,
}

pub struct RoleEditorSession<A: RbacApi> {
    api: Arc<A>,
    roles: Vec<Role>,
    phase: Phase,
    mode: Option<EditorMode>,
    editor: Option<PermissionEditor>,
    notice: Option<Notice>,
    generation: u64,
    search_quiet: Duration,
}

impl<A: RbacApi> RoleEditorSession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_search_quiet(api, DEFAULT_QUIET)
    }

    pub fn with_search_quiet(api: Arc<A>, search_quiet: Duration) -> Self {
        Self {
            api,
            roles: Vec::new(),
            phase: Phase::Closed,
            mode: None,
            editor: None,
            notice: None,
            generation: 0,
            search_quiet,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Outer role list as last fetched
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<EditorMode> {
        self.mode
    }

    /// Editor contents; `None` until both loads have resolved
    pub fn editor(&self) -> Option<&PermissionEditor> {
        self.editor.as_ref()
    }

    /// Mutable editor, only while the draft is editable
    pub fn editor_mut(&mut self) -> Option<&mut PermissionEditor> {
        match self.phase {
            Phase::Open => self.editor.as_mut(),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismiss a transient notice; banners and inline errors stay
    pub fn dismiss_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notice::is_dismissible) {
            self.notice = None;
            true
        } else {
            false
        }
    }

    fn fail(&mut self, err: ClientError) -> EditorError {
        tracing::warn!(error = %err, kind = ?err.kind(), "Role editor request failed");
        self.notice = Some(Notice::from_client_error(&err));
        EditorError::Api(err)
    }

    fn is_current(&self, ticket: Ticket, expected: Phase) -> bool {
        let current = ticket.generation == self.generation && self.phase == expected;
        if !current {
            tracing::debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                phase = ?self.phase,
                "Ignoring stale response"
            );
        }
        current
    }

    fn ticket(&self) -> EditorResult<Ticket> {
        let mode = self.mode.ok_or(EditorError::NotOpen)?;
        Ok(Ticket {
            generation: self.generation,
            mode,
        })
    }

    // ========== Role list ==========

    /// Refetch the outer role list
    pub async fn refresh_roles(&mut self) -> EditorResult<()> {
        let api = Arc::clone(&self.api);
        match api.list_roles().await {
            Ok(roles) => {
                tracing::debug!(count = roles.len(), "Role list refreshed");
                self.roles = roles;
                if self.phase == Phase::Closed {
                    self.notice = None;
                }
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    // ========== Open / close ==========

    /// Enter `Loading` for `mode`, resetting all editor state
    pub fn begin_open(&mut self, mode: EditorMode) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.mode = Some(mode);
        self.editor = None;
        self.notice = None;
        tracing::debug!(?mode, generation = self.generation, "Opening role editor");
        Ticket {
            generation: self.generation,
            mode,
        }
    }

    /// Fetch the catalog and, when editing, the role; both run concurrently
    pub async fn load(api: &A, mode: EditorMode) -> ClientResult<Loaded> {
        let catalog_query = PermissionQuery::all();
        let permissions = api.list_permissions(&catalog_query);
        let (permissions, draft) = match mode {
            EditorMode::Create => (permissions.await?, Draft::blank()),
            EditorMode::Edit(id) => {
                let (permissions, role) = tokio::try_join!(permissions, api.get_role(id))?;
                (permissions, Draft::from_role(&role))
            }
        };
        Ok(Loaded {
            catalog: Catalog::new(permissions),
            draft,
        })
    }

    /// Apply a load result; returns `false` if the ticket is stale
    pub fn finish_open(&mut self, ticket: Ticket, result: ClientResult<Loaded>) -> EditorResult<bool> {
        if !self.is_current(ticket, Phase::Loading) {
            return Ok(false);
        }
        match result {
            Ok(loaded) => {
                tracing::info!(
                    mode = ?ticket.mode,
                    permissions = loaded.catalog.len(),
                    selected = loaded.draft.selection.len(),
                    "Role editor ready"
                );
                self.editor = Some(PermissionEditor::new(
                    loaded.catalog,
                    loaded.draft,
                    self.search_quiet,
                ));
                self.phase = Phase::Open;
                Ok(true)
            }
            Err(err) => {
                self.phase = Phase::Closed;
                self.mode = None;
                Err(self.fail(err))
            }
        }
    }

    pub async fn open(&mut self, mode: EditorMode) -> EditorResult<()> {
        let ticket = self.begin_open(mode);
        let api = Arc::clone(&self.api);
        let result = Self::load(&api, mode).await;
        self.finish_open(ticket, result).map(|_| ())
    }

    /// Discard the draft and close; pending responses become stale
    pub fn close(&mut self) {
        self.generation += 1;
        self.phase = Phase::Closed;
        self.mode = None;
        self.editor = None;
        self.notice = None;
    }

    // ========== Save ==========

    /// Validate the draft and enter `Saving`
    ///
    /// An empty name fails here with a validation notice; no request is made.
    pub fn begin_save(&mut self) -> EditorResult<(Ticket, RolePayload)> {
        match self.phase {
            Phase::Open => {}
            Phase::Saving | Phase::Deleting | Phase::ConfirmingDelete => {
                return Err(EditorError::Busy);
            }
            Phase::Closed | Phase::Loading => return Err(EditorError::NotOpen),
        }
        let ticket = self.ticket()?;
        let draft = self.editor.as_ref().map(PermissionEditor::draft).ok_or(EditorError::NotOpen)?;
        if !draft.has_name() {
            self.notice = Some(Notice::validation(NAME_REQUIRED_MESSAGE));
            return Err(EditorError::NameRequired);
        }
        let payload = draft.to_payload();
        self.phase = Phase::Saving;
        self.notice = None;
        Ok((ticket, payload))
    }

    /// Issue the create/update call for a save ticket
    pub async fn submit(api: &A, ticket: Ticket, payload: &RolePayload) -> ClientResult<Role> {
        match ticket.mode {
            EditorMode::Create => api.create_role(payload).await,
            EditorMode::Edit(id) => api.update_role(id, payload).await,
        }
    }

    /// Apply a save result
    ///
    /// Success closes the editor and returns the saved role; failure returns
    /// to `Open` with the draft untouched. A stale ticket yields `Ok(None)`.
    pub fn finish_save(&mut self, ticket: Ticket, result: ClientResult<Role>) -> EditorResult<Option<Role>> {
        if !self.is_current(ticket, Phase::Saving) {
            return Ok(None);
        }
        match result {
            Ok(role) => {
                let action = match ticket.mode {
                    EditorMode::Create => "create",
                    EditorMode::Edit(_) => "update",
                };
                crate::audit_log!(action, role.id, role.permission_ids.len());
                self.close();
                Ok(Some(role))
            }
            Err(err) => {
                self.phase = Phase::Open;
                Err(self.fail(err))
            }
        }
    }

    /// Save the draft, close, and refetch the role list
    pub async fn save(&mut self) -> EditorResult<Role> {
        let (ticket, payload) = self.begin_save()?;
        let api = Arc::clone(&self.api);
        let result = Self::submit(&api, ticket, &payload).await;
        let role = self.finish_save(ticket, result)?.ok_or(EditorError::NotOpen)?;
        self.refresh_after_commit().await;
        Ok(role)
    }

    async fn refresh_after_commit(&mut self) {
        if let Err(err) = self.refresh_roles().await {
            tracing::warn!(error = %err, "Role list refresh failed after commit");
        }
    }

    // ========== Delete ==========

    /// Ask for delete confirmation (edit mode only)
    pub fn request_delete(&mut self) -> EditorResult<()> {
        if self.phase != Phase::Open {
            return Err(EditorError::NotOpen);
        }
        match self.mode {
            Some(EditorMode::Edit(_)) => {
                self.phase = Phase::ConfirmingDelete;
                Ok(())
            }
            _ => Err(EditorError::NotEditing),
        }
    }

    /// Back out of the confirmation, keeping the draft
    pub fn cancel_delete(&mut self) {
        if self.phase == Phase::ConfirmingDelete {
            self.phase = Phase::Open;
        }
    }

    pub fn begin_delete(&mut self) -> EditorResult<(Ticket, RoleId)> {
        if self.phase != Phase::ConfirmingDelete {
            return Err(EditorError::DeleteNotConfirmed);
        }
        let ticket = self.ticket()?;
        let EditorMode::Edit(id) = ticket.mode else {
            return Err(EditorError::NotEditing);
        };
        self.phase = Phase::Deleting;
        self.notice = None;
        Ok((ticket, id))
    }

    /// Apply a delete result; returns `false` if the ticket is stale
    pub fn finish_delete(&mut self, ticket: Ticket, result: ClientResult<()>) -> EditorResult<bool> {
        if !self.is_current(ticket, Phase::Deleting) {
            return Ok(false);
        }
        match result {
            Ok(()) => {
                if let EditorMode::Edit(id) = ticket.mode {
                    crate::audit_log!("delete", id, 0usize);
                }
                self.close();
                Ok(true)
            }
            Err(err) => {
                self.phase = Phase::Open;
                Err(self.fail(err))
            }
        }
    }

    /// Delete the role after confirmation, close, and refetch the role list
    pub async fn confirm_delete(&mut self) -> EditorResult<()> {
        let (ticket, id) = self.begin_delete()?;
        let api = Arc::clone(&self.api);
        let result = api.delete_role(id).await;
        if self.finish_delete(ticket, result)? {
            self.refresh_after_commit().await;
        }
        Ok(())
    }
}
