//! Application layer: list derivation, forms, and the capabilities they use.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! Form submit → Store mutation (persisted) → derive_view → ListView → render
//!      │
//!      └──▶ ModalCapability / Navigator (side effects)
//! ```
//!
//! Only the [`Store`](crate::storage::Store) holds authoritative state; forms
//! and the list derive from it or ask it to change.
//!
//! # Modules
//!
//! - [`actions`]: dialogs and routes requested by forms
//! - [`capability`]: auth, modal and navigation traits plus stock implementations
//! - [`form`]: write, edit, retrospect and delete state machines
//! - [`modes`]: form state, delete state and emotion filter enums
//! - [`state`]: pure list derivation and the list controller

pub mod actions;
pub mod capability;
pub mod form;
pub mod modes;
pub mod state;

pub use actions::{Modal, Route};
pub use capability::{AuthCapability, ModalCapability, Navigator, SessionAuth};
pub use form::{
    DeleteFlow, DiaryFields, EditForm, FieldErrors, RetrospectForm, SubmitOutcome, WriteForm,
};
pub use modes::{DeleteState, EmotionFilter, FormState};
pub use state::{derive_view, ListController, ListQuery, PAGE_SIZE};
