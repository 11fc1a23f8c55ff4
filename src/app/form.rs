//! Diary forms: write, edit, retrospect and delete.
//!
//! Each form validates its fields on every change, moves through
//! [`FormState`], and on submit applies exactly one mutation to the injected
//! [`Store`]. Dialogs and navigation go through the capabilities in
//! [`crate::app::capability`].
//!
//! # Validation Rules
//!
//! - title: required, not blank
//! - content: required, not blank
//! - emotion: required, no default
//!
//! Validation failures never become `Err`; they are reported as
//! [`FieldErrors`] and keep submit disabled.
//!
//! # Example
//!
//! ```rust
//! use daybook::app::capability::{RecordingModal, RecordingNavigator};
//! use daybook::app::{FormState, Route, SubmitOutcome, WriteForm};
//! use daybook::storage::{DiaryStore, MemoryArea};
//! use daybook::Emotion;
//!
//! let mut store = DiaryStore::new(MemoryArea::default());
//! let mut modal = RecordingModal::default();
//! let mut nav = RecordingNavigator::default();
//!
//! let mut form = WriteForm::new();
//! form.set_title("첫 번째 일기");
//! form.set_content("오늘은 맑음");
//! form.set_emotion(Some(Emotion::Happy));
//! assert_eq!(form.state(), FormState::Valid);
//!
//! let outcome = form.submit(&mut store, &mut modal, &mut nav)?;
//! assert!(matches!(outcome, SubmitOutcome::Saved(ref r) if r.id == 1));
//! assert_eq!(nav.current(), Some(Route::DiaryDetail(1)));
//! # Ok::<(), daybook::DaybookError>(())
//! ```

use super::actions::{Modal, Route, CREATED_TITLE, DELETED_TITLE, UPDATED_TITLE};
use super::capability::{AuthCapability, ModalCapability, Navigator};
use super::modes::{DeleteState, FormState};
use crate::domain::error::Result;
use crate::domain::{DiaryPatch, DiaryRecord, Emotion, NewDiary};
use crate::storage::backend::Store;

pub const TITLE_REQUIRED: &str = "제목을 입력해 주세요.";
pub const CONTENT_REQUIRED: &str = "내용을 입력해 주세요.";
pub const EMOTION_REQUIRED: &str = "감정을 선택해 주세요.";
pub const RETROSPECT_REQUIRED: &str = "회고 내용을 입력해 주세요.";

/// Inline validation messages, one slot per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<&'static str>,
    pub content: Option<&'static str>,
    pub emotion: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.emotion.is_none()
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not in a submittable state, or its target vanished.
    /// Nothing was written.
    Blocked,

    /// The mutation was applied; carries the stored record.
    Saved(DiaryRecord),
}

/// Title, content and emotion as currently entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryFields {
    pub title: String,
    pub content: String,
    pub emotion: Option<Emotion>,
}

impl DiaryFields {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            title: self.title.trim().is_empty().then_some(TITLE_REQUIRED),
            content: self.content.trim().is_empty().then_some(CONTENT_REQUIRED),
            emotion: self.emotion.is_none().then_some(EMOTION_REQUIRED),
        }
    }

    fn to_new_diary(&self) -> Option<NewDiary> {
        let emotion = self.emotion?;
        Some(NewDiary::new(self.title.clone(), self.content.clone(), emotion))
    }
}

/// Shared field handling for the write and edit forms.
#[derive(Debug, Clone, Default)]
struct Validated {
    fields: DiaryFields,
    errors: FieldErrors,
    state: FormState,
}

impl Validated {
    fn revalidate(&mut self) {
        self.errors = self.fields.validate();
        self.state = if self.errors.is_empty() {
            FormState::Valid
        } else {
            FormState::Invalid
        };
        tracing::trace!(state = ?self.state, "form revalidated");
    }

    fn set_title(&mut self, title: String) {
        self.fields.title = title;
        self.revalidate();
    }

    fn set_content(&mut self, content: String) {
        self.fields.content = content;
        self.revalidate();
    }

    fn set_emotion(&mut self, emotion: Option<Emotion>) {
        self.fields.emotion = emotion;
        self.revalidate();
    }
}

/// Form for writing a new diary.
#[derive(Debug, Clone, Default)]
pub struct WriteForm {
    inner: Validated,
}

impl WriteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.inner.state
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.inner.errors
    }

    #[must_use]
    pub const fn fields(&self) -> &DiaryFields {
        &self.inner.fields
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.inner.set_title(title.into());
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.inner.set_content(content.into());
    }

    /// Selects an emotion; `None` clears the selection.
    pub fn set_emotion(&mut self, emotion: Option<Emotion>) {
        self.inner.set_emotion(emotion);
    }

    /// Appends the diary, shows the success dialog and opens its detail view.
    ///
    /// Returns [`SubmitOutcome::Blocked`] without touching the store unless
    /// the form is [`FormState::Valid`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails. An error dialog is shown and
    /// the form goes back to `Valid` so the user can retry.
    pub fn submit(
        &mut self,
        store: &mut dyn Store,
        modal: &mut dyn ModalCapability,
        navigator: &mut dyn Navigator,
    ) -> Result<SubmitOutcome> {
        let _span = tracing::debug_span!("write_form_submit", state = ?self.inner.state).entered();

        if !self.inner.state.can_submit() {
            tracing::debug!("submit ignored, form not valid");
            return Ok(SubmitOutcome::Blocked);
        }
        let Some(diary) = self.inner.fields.to_new_diary() else {
            return Ok(SubmitOutcome::Blocked);
        };

        self.inner.state = FormState::Submitting;
        let record = match store.append(diary) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "failed to save diary");
                self.inner.state = FormState::Valid;
                modal.open(Modal::error(e.to_string()));
                return Err(e);
            }
        };

        self.inner.state = FormState::Success;
        tracing::info!(diary_id = record.id, "diary created");
        modal.open(Modal::success(CREATED_TITLE));
        navigator.navigate_to(Route::DiaryDetail(record.id));
        Ok(SubmitOutcome::Saved(record))
    }

    /// Clears every field and returns to `Idle`.
    pub fn reset(&mut self) {
        self.inner = Validated::default();
    }
}

/// Form for editing an existing diary.
#[derive(Debug, Clone)]
pub struct EditForm {
    diary_id: u64,
    inner: Validated,
}

impl EditForm {
    /// Opens the form prefilled from `record`; it starts out `Valid`.
    #[must_use]
    pub fn from_record(record: &DiaryRecord) -> Self {
        let mut inner = Validated {
            fields: DiaryFields {
                title: record.title.clone(),
                content: record.content.clone(),
                emotion: Some(record.emotion),
            },
            ..Validated::default()
        };
        inner.revalidate();
        Self {
            diary_id: record.id,
            inner,
        }
    }

    #[must_use]
    pub const fn diary_id(&self) -> u64 {
        self.diary_id
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.inner.state
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.inner.errors
    }

    #[must_use]
    pub const fn fields(&self) -> &DiaryFields {
        &self.inner.fields
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.inner.set_title(title.into());
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.inner.set_content(content.into());
    }

    pub fn set_emotion(&mut self, emotion: Option<Emotion>) {
        self.inner.set_emotion(emotion);
    }

    /// Writes the edited fields back and returns to the detail view.
    ///
    /// If the diary was deleted in the meantime an error dialog is shown and
    /// [`SubmitOutcome::Blocked`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn submit(
        &mut self,
        store: &mut dyn Store,
        modal: &mut dyn ModalCapability,
        navigator: &mut dyn Navigator,
    ) -> Result<SubmitOutcome> {
        let _span = tracing::debug_span!("edit_form_submit",
            diary_id = self.diary_id,
            state = ?self.inner.state
        ).entered();

        if !self.inner.state.can_submit() {
            tracing::debug!("submit ignored, form not valid");
            return Ok(SubmitOutcome::Blocked);
        }

        let patch = DiaryPatch {
            title: Some(self.inner.fields.title.clone()),
            content: Some(self.inner.fields.content.clone()),
            emotion: self.inner.fields.emotion,
            retrospect: None,
        };

        self.inner.state = FormState::Submitting;
        match store.update(self.diary_id, &patch) {
            Ok(Some(record)) => {
                self.inner.state = FormState::Success;
                tracing::info!(diary_id = record.id, "diary updated");
                modal.open(Modal::success(UPDATED_TITLE));
                navigator.navigate_to(Route::DiaryDetail(record.id));
                Ok(SubmitOutcome::Saved(record))
            }
            Ok(None) => {
                tracing::warn!("diary disappeared before edit was saved");
                self.inner.state = FormState::Valid;
                modal.open(Modal::error("존재하지 않는 일기입니다."));
                Ok(SubmitOutcome::Blocked)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update diary");
                self.inner.state = FormState::Valid;
                modal.open(Modal::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Clears every field and returns to `Idle`.
    pub fn reset(&mut self) {
        self.inner = Validated::default();
    }
}

/// Form attaching a retrospect to a diary from its detail view.
#[derive(Debug, Clone)]
pub struct RetrospectForm {
    diary_id: u64,
    text: String,
    error: Option<&'static str>,
    state: FormState,
}

impl RetrospectForm {
    #[must_use]
    pub const fn new(diary_id: u64) -> Self {
        Self {
            diary_id,
            text: String::new(),
            error: None,
            state: FormState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    #[must_use]
    pub const fn error(&self) -> Option<&'static str> {
        self.error
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = self.text.trim().is_empty().then_some(RETROSPECT_REQUIRED);
        self.state = if self.error.is_none() {
            FormState::Valid
        } else {
            FormState::Invalid
        };
    }

    /// Saves the retrospect and clears the input for the next one.
    ///
    /// The detail view stays open, so no navigation happens.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn submit(&mut self, store: &mut dyn Store) -> Result<SubmitOutcome> {
        let _span = tracing::debug_span!("retrospect_submit", diary_id = self.diary_id).entered();

        if !self.state.can_submit() {
            return Ok(SubmitOutcome::Blocked);
        }

        self.state = FormState::Submitting;
        let result = store.update(self.diary_id, &DiaryPatch::retrospect(self.text.clone()));
        match result {
            Ok(Some(record)) => {
                self.state = FormState::Success;
                tracing::info!(diary_id = record.id, "retrospect saved");
                self.reset();
                Ok(SubmitOutcome::Saved(record))
            }
            Ok(None) => {
                tracing::warn!("retrospect target missing");
                self.state = FormState::Valid;
                Ok(SubmitOutcome::Blocked)
            }
            Err(e) => {
                self.state = FormState::Valid;
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.error = None;
        self.state = FormState::Idle;
    }
}

/// Confirm/cancel flow for deleting a diary, gated on login.
#[derive(Debug, Clone)]
pub struct DeleteFlow {
    diary_id: u64,
    state: DeleteState,
}

impl DeleteFlow {
    #[must_use]
    pub const fn new(diary_id: u64) -> Self {
        Self {
            diary_id,
            state: DeleteState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DeleteState {
        self.state
    }

    /// Opens the confirmation dialog, or the login prompt when logged out.
    ///
    /// Returns whether the flow is now awaiting confirmation.
    pub fn request<A: AuthCapability>(&mut self, auth: &A, modal: &mut dyn ModalCapability) -> bool {
        if self.state == DeleteState::Deleted {
            return false;
        }
        let confirming = auth
            .require_auth(modal, || ())
            .is_some();
        if confirming {
            modal.open(Modal::confirm_delete());
            self.state = DeleteState::Confirming;
        }
        tracing::debug!(diary_id = self.diary_id, confirming = confirming, "delete requested");
        confirming
    }

    /// Dismisses the confirmation dialog.
    pub fn cancel(&mut self, modal: &mut dyn ModalCapability) {
        if self.state == DeleteState::Confirming {
            modal.close();
            self.state = DeleteState::Cancelled;
        }
    }

    /// Deletes the diary after confirmation and returns to the list.
    ///
    /// Does nothing unless [`request`](Self::request) put the flow into
    /// `Confirming`. Login is checked again, since it may have expired while
    /// the dialog was open. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn confirm<A: AuthCapability>(
        &mut self,
        auth: &A,
        store: &mut dyn Store,
        modal: &mut dyn ModalCapability,
        navigator: &mut dyn Navigator,
    ) -> Result<bool> {
        let _span = tracing::debug_span!("delete_confirm", diary_id = self.diary_id).entered();

        if self.state != DeleteState::Confirming {
            tracing::debug!(state = ?self.state, "delete not confirmed, ignoring");
            return Ok(false);
        }

        modal.close();
        let diary_id = self.diary_id;
        let Some(result) = auth.require_auth(modal, || store.remove(diary_id)) else {
            self.state = DeleteState::Idle;
            return Ok(false);
        };
        let removed = result?;

        self.state = DeleteState::Deleted;
        tracing::info!(diary_id = diary_id, removed = removed, "diary deleted");
        modal.open(Modal::success(DELETED_TITLE));
        navigator.navigate_to(Route::DiaryList);
        Ok(removed)
    }
}
