// ── Form modal state machine ──
//
// Closed ──open_create──▶ Open(create) ──save ok──▶ Closed
// Closed ──open_edit(found)──▶ Open(edit id) ──save ok──▶ Closed
// Open ──cancel──▶ Closed
//
// A failed or empty fetch in `open_edit` never opens the modal. A failed
// save keeps it open with the buffer intact.

use std::future::Future;

use tracing::{debug, warn};

use crate::controller::Controller;
use crate::error::CoreError;

/// An editable buffer for one record kind.
pub trait EntityForm: Default + Clone + Send + Sync {
    type Id: Copy + Eq + std::fmt::Display + Send + Sync;
    type Entity: Send;

    /// Fill a buffer from an existing record.
    fn load(entity: &Self::Entity) -> Self;

    /// Check required fields before anything is sent.
    fn validate(&self) -> Result<(), CoreError>;

    /// Fetch the record behind an edit.
    fn fetch(
        controller: &Controller,
        id: Self::Id,
    ) -> impl Future<Output = Result<Option<Self::Entity>, CoreError>> + Send;

    /// Dispatch a create (`editing == None`) or an update.
    fn submit(
        &self,
        controller: &Controller,
        editing: Option<Self::Id>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Modal visibility, edit target and form buffer for one view.
#[derive(Debug, Clone, Default)]
pub struct FormModal<F: EntityForm> {
    is_open: bool,
    editing: Option<F::Id>,
    form: F,
}

impl<F: EntityForm> FormModal<F> {
    pub fn new() -> Self {
        Self {
            is_open: false,
            editing: None,
            form: F::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Id of the record being edited; `None` while creating or closed.
    pub fn editing(&self) -> Option<F::Id> {
        self.editing
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Open with an empty buffer.
    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = F::default();
        self.is_open = true;
    }

    /// Fetch `id` and open with its values. Returns whether the modal
    /// opened; on a missing record or a failed fetch it stays closed.
    pub async fn open_edit(&mut self, controller: &Controller, id: F::Id) -> bool {
        match F::fetch(controller, id).await {
            Ok(Some(entity)) => {
                self.form = F::load(&entity);
                self.editing = Some(id);
                self.is_open = true;
                true
            }
            Ok(None) => {
                debug!(%id, "record not found; edit form not opened");
                false
            }
            Err(e) => {
                warn!(%id, error = %e, "could not load record for editing");
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.is_open = false;
        self.editing = None;
    }

    /// Validate and dispatch. Validation failures send nothing and leave
    /// the modal as it was.
    pub async fn save(&mut self, controller: &Controller) -> Result<(), CoreError> {
        self.form.validate()?;
        self.form.submit(controller, self.editing).await?;
        self.is_open = false;
        self.editing = None;
        self.form = F::default();
        Ok(())
    }
}
