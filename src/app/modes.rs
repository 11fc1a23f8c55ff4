//! State machine enums for forms and list filtering.
//!
//! # Form State Machine
//!
//! ```text
//! Idle ──field change──▶ Invalid ◀──────▶ Valid ──submit──▶ Submitting ──▶ Success
//!  ▲                                                                          │
//!  └───────────────────────────────── reset ──────────────────────────────────┘
//! ```
//!
//! Deletion has no fields and follows its own confirm/cancel machine,
//! [`DeleteState`].
//!
//! # Example
//!
//! ```rust
//! use daybook::app::modes::{EmotionFilter, FormState};
//! use daybook::Emotion;
//!
//! assert!(FormState::Valid.can_submit());
//! assert!(EmotionFilter::Only(Emotion::Sad).matches(Emotion::Sad));
//! assert!(EmotionFilter::All.matches(Emotion::Angry));
//! ```

use crate::domain::{Emotion, ParseEmotionError};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a single write, edit or retrospect form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Freshly opened or reset; nothing entered yet.
    #[default]
    Idle,

    /// At least one required field is missing. Submit is disabled.
    Invalid,

    /// Every required field is present. Submit is enabled.
    Valid,

    /// The store mutation is running.
    Submitting,

    /// The mutation resolved; confirmation shown and navigation performed.
    Success,
}

impl FormState {
    /// Whether the submit button is enabled.
    #[must_use]
    pub const fn can_submit(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Lifecycle of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Idle,

    /// Confirmation dialog is open.
    Confirming,

    /// The user dismissed the confirmation.
    Cancelled,

    /// The diary was removed.
    Deleted,
}

/// Emotion constraint applied to the diary list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmotionFilter {
    /// Every emotion passes.
    #[default]
    All,

    /// Only diaries with this emotion pass.
    Only(Emotion),
}

impl EmotionFilter {
    #[must_use]
    pub fn matches(self, emotion: Emotion) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == emotion,
        }
    }
}

impl fmt::Display for EmotionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(emotion) => emotion.fmt(f),
        }
    }
}

impl FromStr for EmotionFilter {
    type Err = ParseEmotionError;

    /// Parses `all` (any case) or an emotion wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_valid_state_can_submit() {
        for state in [
            FormState::Idle,
            FormState::Invalid,
            FormState::Submitting,
            FormState::Success,
        ] {
            assert!(!state.can_submit(), "{state:?}");
        }
        assert!(FormState::Valid.can_submit());
    }

    #[test]
    fn parses_filters() {
        assert_eq!("ALL".parse::<EmotionFilter>(), Ok(EmotionFilter::All));
        assert_eq!(
            "angry".parse::<EmotionFilter>(),
            Ok(EmotionFilter::Only(Emotion::Angry))
        );
        assert!("everything".parse::<EmotionFilter>().is_err());
    }

    #[test]
    fn only_filter_rejects_other_emotions() {
        let filter = EmotionFilter::Only(Emotion::Happy);
        assert!(!filter.matches(Emotion::Etc));
        assert_eq!(filter.to_string(), "HAPPY");
    }
}
