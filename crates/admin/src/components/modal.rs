//! Add/edit dialog and delete confirmation state.

use pawtrack_core::{Animal, AnimalId, AnimalKind};

use crate::forms::{AnimalForm, FormErrors, Submission};

/// State of the add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorModal {
    #[default]
    Closed,
    OpenForCreate(AnimalForm),
    OpenForEdit {
        record: Box<Animal>,
        form: AnimalForm,
    },
}

impl EditorModal {
    /// Open with an empty form for `kind`.
    pub fn open_create(&mut self, kind: AnimalKind) {
        *self = Self::OpenForCreate(AnimalForm::empty(kind));
    }

    /// Open with a form pre-filled from `record`.
    pub fn open_edit(&mut self, record: &Animal) {
        *self = Self::OpenForEdit {
            record: Box::new(record.clone()),
            form: AnimalForm::from_record(record),
        };
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The record being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&Animal> {
        match self {
            Self::OpenForEdit { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Dialog title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::Closed => None,
            Self::OpenForCreate(form) => Some(format!("Add New {}", form.kind().label())),
            Self::OpenForEdit { form, .. } => Some(format!("Edit {}", form.kind().label())),
        }
    }

    #[must_use]
    pub const fn form(&self) -> Option<&AnimalForm> {
        match self {
            Self::Closed => None,
            Self::OpenForCreate(form) | Self::OpenForEdit { form, .. } => Some(form),
        }
    }

    pub const fn form_mut(&mut self) -> Option<&mut AnimalForm> {
        match self {
            Self::Closed => None,
            Self::OpenForCreate(form) | Self::OpenForEdit { form, .. } => Some(form),
        }
    }

    /// Close without saving.
    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Close by clicking outside or pressing escape. Same as cancel.
    pub fn dismiss(&mut self) {
        self.cancel();
    }

    /// Validate the form. On success the dialog closes and the submission
    /// is handed to the caller; on failure it stays open.
    ///
    /// Returns `Ok(None)` when the dialog is closed.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] when the form does not validate.
    pub fn save(&mut self) -> Result<Option<Submission>, FormErrors> {
        let Some(form) = self.form() else {
            return Ok(None);
        };
        let submission = form.submit()?;
        *self = Self::Closed;
        Ok(Some(submission))
    }
}

/// State of the delete confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    PendingConfirm(Box<Animal>),
}

impl DeleteConfirm {
    /// Ask for confirmation before deleting `record`.
    pub fn request(&mut self, record: &Animal) {
        *self = Self::PendingConfirm(Box::new(record.clone()));
    }

    #[must_use]
    pub fn pending(&self) -> Option<&Animal> {
        match self {
            Self::Idle => None,
            Self::PendingConfirm(record) => Some(record),
        }
    }

    /// Prompt text, e.g. `Are you sure you want to delete "Whiskers"?`.
    #[must_use]
    pub fn prompt(&self) -> Option<String> {
        self.pending().map(|r| {
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                r.details.name
            )
        })
    }

    /// Confirm and return the id to delete. Only this transition yields an
    /// id; the prompt returns to idle either way.
    pub fn confirm(&mut self) -> Option<AnimalId> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::PendingConfirm(record) => Some(record.id),
        }
    }

    pub fn dismiss(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::services::notify::MemoryNotifier;

    fn registry() -> Registry<MemoryNotifier> {
        Registry::seeded(MemoryNotifier::new(), Some(5))
    }

    #[test]
    fn test_create_dialog_keeps_open_on_invalid_save() {
        let mut modal = EditorModal::default();
        modal.open_create(AnimalKind::Cat);
        assert_eq!(modal.title().as_deref(), Some("Add New Cat"));
        assert_eq!(modal.form().unwrap().details.markings, "None");

        assert!(modal.save().is_err());
        assert!(modal.is_open());

        modal.cancel();
        assert_eq!(modal, EditorModal::Closed);
        assert!(modal.save().unwrap().is_none());
    }

    #[test]
    fn test_edit_dialog_saves_update() {
        let mut registry = registry();
        let dog = registry.dogs()[0].clone();

        let mut modal = EditorModal::default();
        modal.open_edit(&dog);
        assert_eq!(modal.editing().unwrap().id, dog.id);
        assert_eq!(
            modal.form().unwrap().dog_traits(),
            dog.dog_traits()
        );

        modal.form_mut().unwrap().details.name = "Renamed".to_string();
        let submission = modal.save().unwrap().unwrap();
        assert!(!modal.is_open());

        let updated = submission.apply(&mut registry).unwrap();
        assert_eq!(updated.id, dog.id);
        assert_eq!(updated.details.name, "Renamed");
    }

    #[test]
    fn test_only_confirm_yields_an_id() {
        let mut registry = registry();
        let cat = registry.cats()[0].clone();
        let before = registry.cats().len();

        let mut prompt = DeleteConfirm::default();
        prompt.request(&cat);
        assert!(prompt.prompt().unwrap().contains(&cat.details.name));
        prompt.dismiss();
        assert!(prompt.confirm().is_none());
        assert_eq!(registry.cats().len(), before);

        prompt.request(&cat);
        let id = prompt.confirm().unwrap();
        assert_eq!(prompt, DeleteConfirm::Idle);
        assert!(registry.delete(AnimalKind::Cat, &id).is_some());
        assert_eq!(registry.cats().len(), before - 1);
    }
}
