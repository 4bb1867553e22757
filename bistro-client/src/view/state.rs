//! List screen state machine
//!
//! ```text
//! Loading ──loaded──▶ Ready ──saved/deleted──▶ Ready
//!    │
//!    └──load failed──▶ Error (banner shown, screen stays usable)
//! ```
//!
//! Pure and synchronous. Server results are applied in the order they are
//! handed in; when two mutations race, the last one applied wins.

use shared::Resource;

/// Initial fetch progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error,
}

/// Edited entity, create or update depending on identity
#[derive(Debug, Clone)]
pub enum Draft<R: Resource> {
    Create(R::Create),
    Update(R::Id, R::Update),
}

impl<R: Resource> Draft<R> {
    pub fn id(&self) -> Option<&R::Id> {
        match self {
            Self::Create(_) => None,
            Self::Update(id, _) => Some(id),
        }
    }
}

/// Open create/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<R: Resource> {
    /// Entity being edited, `None` when creating
    pub editing: Option<R::Id>,
    /// Last save failure, shown on the form
    pub error: Option<String>,
    /// A save is in flight
    pub submitting: bool,
}

impl<R: Resource> Editor<R> {
    fn new(editing: Option<R::Id>) -> Self {
        Self {
            editing,
            error: None,
            submitting: false,
        }
    }
}

/// Pending delete, waiting for the user to confirm
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmation<R: Resource> {
    pub id: R::Id,
    pub prompt: String,
}

/// Local cache and UI state of one resource list screen
#[derive(Debug, Clone)]
pub struct ListState<R: Resource> {
    load: LoadState,
    items: Vec<R>,
    error: Option<String>,
    editor: Option<Editor<R>>,
    pending_delete: Option<DeleteConfirmation<R>>,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ListState<R> {
    pub fn new() -> Self {
        Self {
            load: LoadState::Loading,
            items: Vec::new(),
            error: None,
            editor: None,
            pending_delete: None,
        }
    }

    // ========== Accessors ==========

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Banner error
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editor(&self) -> Option<&Editor<R>> {
        self.editor.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&DeleteConfirmation<R>> {
        self.pending_delete.as_ref()
    }

    // ========== Load ==========

    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    pub fn apply_loaded(&mut self, items: Vec<R>) {
        self.items = items;
        self.load = LoadState::Ready;
    }

    /// Cache is left as it was, the screen stays interactive
    pub fn apply_load_failed(&mut self, message: impl Into<String>) {
        self.load = LoadState::Error;
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ========== Save ==========

    pub fn open_create(&mut self) {
        self.editor = Some(Editor::new(None));
    }

    pub fn open_edit(&mut self, id: R::Id) {
        self.editor = Some(Editor::new(Some(id)));
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Mark a save in flight for `editing`, opening the form if needed
    pub fn begin_submit(&mut self, editing: Option<R::Id>) {
        let editor = self.editor.get_or_insert_with(|| Editor::new(None));
        editor.editing = editing;
        editor.error = None;
        editor.submitting = true;
    }

    /// Reconcile a server-confirmed entity and close the form
    pub fn apply_saved(&mut self, saved: R) {
        self.reconcile(saved);
        self.editor = None;
    }

    /// The form stays open with the error, the cache is untouched
    pub fn apply_save_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self.editor.as_mut() {
            Some(editor) => {
                editor.submitting = false;
                editor.error = Some(message);
            }
            None => self.error = Some(message),
        }
    }

    /// Replace the entry with the same id in place, or append
    pub fn reconcile(&mut self, entity: R) {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => *slot = entity,
            None => self.items.push(entity),
        }
    }

    // ========== Delete ==========

    /// Ask the user to confirm deleting `id`
    pub fn request_delete(&mut self, id: R::Id) {
        let target = self
            .find(&id)
            .map(|item| item.label())
            .unwrap_or_else(|| format!("#{}", id));
        let prompt = format!(
            "Are you sure you want to delete this {}? ({})",
            R::SINGULAR,
            target
        );
        self.pending_delete = Some(DeleteConfirmation { id, prompt });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Dismiss the prompt and hand back the confirmed target
    pub fn take_confirmed_delete(&mut self) -> Option<R::Id> {
        self.pending_delete.take().map(|pending| pending.id)
    }

    pub fn apply_deleted(&mut self, id: &R::Id) {
        self.items.retain(|item| item.id() != id);
    }

    pub fn apply_delete_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
