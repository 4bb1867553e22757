//! List-reconciliation view model
//!
//! Backs one resource list screen (users, tables, menu items):
//! fetch on mount, reconcile server-confirmed saves by identity,
//! confirm before delete, surface errors inline.
//!
//! Operations never return errors. Failures land in the banner or on the
//! open form, and the user retries by hand. A 401 from the backend also
//! signs the session out.

mod state;

pub use state::{DeleteConfirmation, Draft, Editor, ListState, LoadState};

use std::sync::Arc;

use shared::Resource;

use crate::ClientError;
use crate::resource::ResourceClient;
use crate::session::SessionStore;

/// Async driver of a [`ListState`]
///
/// Every operation takes `&mut self`, so one view model never has two
/// submissions in flight. Dropping it discards any pending result.
#[derive(Debug)]
pub struct ListViewModel<R: Resource> {
    client: ResourceClient<R>,
    session: Arc<SessionStore>,
    state: ListState<R>,
}

impl<R: Resource> ListViewModel<R> {
    pub fn new(client: ResourceClient<R>, session: Arc<SessionStore>) -> Self {
        Self {
            client,
            session,
            state: ListState::new(),
        }
    }

    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    pub fn items(&self) -> &[R] {
        self.state.items()
    }

    /// Initial fetch
    pub async fn mount(&mut self) {
        self.reload().await;
    }

    /// Fetch the list again, replacing the cache on success
    pub async fn reload(&mut self) {
        self.state.begin_load();
        let token = self.session.token();
        match self.client.list(token.as_deref()).await {
            Ok(items) => {
                tracing::debug!(collection = R::COLLECTION, count = items.len(), "List loaded");
                self.state.apply_loaded(items);
            }
            Err(e) => {
                self.on_failure(&e);
                self.state.apply_load_failed(e.user_message());
            }
        }
    }

    pub fn open_create(&mut self) {
        self.state.open_create();
    }

    pub fn open_edit(&mut self, id: R::Id) {
        self.state.open_edit(id);
    }

    pub fn close_editor(&mut self) {
        self.state.close_editor();
    }

    /// Create or update, then reconcile the server's copy
    ///
    /// Returns whether the save went through. On failure the form stays
    /// open with the error and the cache is unchanged.
    pub async fn save(&mut self, draft: Draft<R>) -> bool {
        self.state.begin_submit(draft.id().cloned());
        let token = self.session.token();
        let result = match &draft {
            Draft::Create(payload) => self.client.create(payload, token.as_deref()).await,
            Draft::Update(id, payload) => self.client.update(id, payload, token.as_deref()).await,
        };

        match result {
            Ok(saved) => {
                tracing::debug!(collection = R::COLLECTION, id = %saved.id(), "Saved");
                self.state.apply_saved(saved);
                true
            }
            Err(e) => {
                self.on_failure(&e);
                self.state.apply_save_failed(e.user_message());
                false
            }
        }
    }

    /// Open the confirmation prompt, nothing is sent yet
    pub fn request_delete(&mut self, id: R::Id) {
        self.state.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    /// Delete the entity named by the open prompt
    ///
    /// No-op without a prompt. The prompt is dismissed whatever the outcome.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.state.take_confirmed_delete() else {
            return false;
        };
        let token = self.session.token();
        match self.client.remove(&id, token.as_deref()).await {
            Ok(()) => {
                tracing::debug!(collection = R::COLLECTION, %id, "Deleted");
                self.state.apply_deleted(&id);
                true
            }
            Err(e) => {
                self.on_failure(&e);
                self.state.apply_delete_failed(e.user_message());
                false
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    fn on_failure(&self, error: &ClientError) {
        tracing::warn!(collection = R::COLLECTION, error = %error, "Operation failed");
        if error.is_auth_rejected() {
            self.session.invalidate();
        }
    }
}
