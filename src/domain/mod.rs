//! Domain layer for daybook.
//!
//! Core diary types and the crate error, independent of how records are stored
//! or presented.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`diary`]: Diary record, emotion enumeration and mutation inputs
//!
//! # Examples
//!
//! ```
//! use daybook::domain::{Emotion, NewDiary};
//!
//! let draft = NewDiary::new("첫 번째 일기", "오늘은 맑음", Emotion::Happy);
//! assert_eq!(draft.emotion.label(), "행복해요");
//! ```

pub mod diary;
pub mod error;

pub use diary::{DiaryPatch, DiaryRecord, Emotion, NewDiary, ParseEmotionError};
pub use error::{DaybookError, Result};
