//! Diary domain model.
//!
//! This module defines [`DiaryRecord`], the persisted diary entry, together with
//! the fixed [`Emotion`] enumeration and the two mutation inputs: [`NewDiary`]
//! for creation and [`DiaryPatch`] for partial updates.
//!
//! The serde representation of [`DiaryRecord`] is the durable storage layout:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "첫 번째 일기",
//!   "content": "오늘은 맑음",
//!   "emotion": "HAPPY",
//!   "createdAt": "2024-05-01T09:30:00Z",
//!   "retrospect": "다시 읽어보니 좋았다"
//! }
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotion attached to every diary.
///
/// Serialized with its upper-case wire name (`"HAPPY"`, `"SAD"`, ...). Any
/// other string fails deserialization, so a record can never carry free-form
/// emotion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprise,
    Etc,
}

impl Emotion {
    /// All emotions in the order the emotion picker shows them.
    pub const ALL: [Self; 5] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Surprise,
        Self::Etc,
    ];

    /// Wire name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "HAPPY",
            Self::Sad => "SAD",
            Self::Angry => "ANGRY",
            Self::Surprise => "SURPRISE",
            Self::Etc => "ETC",
        }
    }

    /// User-facing label shown on diary cards.
    ///
    /// ```
    /// use daybook::Emotion;
    ///
    /// assert_eq!(Emotion::Surprise.label(), "놀랐어요");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Happy => "행복해요",
            Self::Sad => "슬퍼요",
            Self::Angry => "화나요",
            Self::Surprise => "놀랐어요",
            Self::Etc => "기타",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known emotion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion '{0}', expected one of HAPPY, SAD, ANGRY, SURPRISE, ETC")]
pub struct ParseEmotionError(pub String);

impl FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|emotion| emotion.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}

/// One persisted diary entry.
///
/// `id` and `created_at` are assigned by the store on append and never change
/// afterwards; [`DiaryPatch::apply_to`] cannot touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrospect: Option<String>,
}

impl DiaryRecord {
    /// Formats the creation date as `YYYY. MM. DD` in local time.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.display_date_in(&Local)
    }

    /// Formats the creation date as `YYYY. MM. DD` in the given time zone.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use daybook::{DiaryRecord, Emotion};
    ///
    /// let record = DiaryRecord {
    ///     id: 1,
    ///     title: "t".into(),
    ///     content: "c".into(),
    ///     emotion: Emotion::Etc,
    ///     created_at: Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap(),
    ///     retrospect: None,
    /// };
    /// assert_eq!(record.display_date_in(&Utc), "2024. 03. 07");
    /// ```
    #[must_use]
    pub fn display_date_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.created_at
            .with_timezone(tz)
            .format("%Y. %m. %d")
            .to_string()
    }
}

/// A diary as written by the user, before the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiary {
    pub title: String,
    pub content: String,
    pub emotion: Emotion,
}

impl NewDiary {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            emotion,
        }
    }

    /// Builds the stored record for this draft.
    #[must_use]
    pub fn into_record(self, id: u64, created_at: DateTime<Utc>) -> DiaryRecord {
        DiaryRecord {
            id,
            title: self.title,
            content: self.content,
            emotion: self.emotion,
            created_at,
            retrospect: None,
        }
    }
}

/// Partial update merged into an existing record.
///
/// `None` fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub emotion: Option<Emotion>,
    pub retrospect: Option<String>,
}

impl DiaryPatch {
    /// Patch that only sets the retrospect.
    #[must_use]
    pub fn retrospect(text: impl Into<String>) -> Self {
        Self {
            retrospect: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.emotion.is_none()
            && self.retrospect.is_none()
    }

    pub fn apply_to(&self, record: &mut DiaryRecord) {
        if let Some(title) = &self.title {
            record.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            record.content.clone_from(content);
        }
        if let Some(emotion) = self.emotion {
            record.emotion = emotion;
        }
        if let Some(retrospect) = &self.retrospect {
            record.retrospect = Some(retrospect.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiaryRecord {
        NewDiary::new("제목", "내용", Emotion::Sad)
            .into_record(3, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn serializes_storage_layout() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["emotion"], "SAD");
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
        assert!(json.get("retrospect").is_none());
    }

    #[test]
    fn rejects_unknown_emotion_text() {
        let raw = r#"{"id":1,"title":"a","content":"b","emotion":"BORED","createdAt":"2024-01-02T03:04:05Z"}"#;
        assert!(serde_json::from_str::<DiaryRecord>(raw).is_err());
    }

    #[test]
    fn parses_emotion_case_insensitively() {
        assert_eq!("happy".parse::<Emotion>(), Ok(Emotion::Happy));
        assert_eq!(" Surprise ".parse::<Emotion>(), Ok(Emotion::Surprise));
        assert!("joy".parse::<Emotion>().is_err());
    }

    #[test]
    fn patch_keeps_identity_fields() {
        let mut record = sample();
        let before = record.clone();
        DiaryPatch {
            title: Some("새 제목".into()),
            emotion: Some(Emotion::Happy),
            ..DiaryPatch::default()
        }
        .apply_to(&mut record);

        assert_eq!(record.id, before.id);
        assert_eq!(record.created_at, before.created_at);
        assert_eq!(record.title, "새 제목");
        assert_eq!(record.content, "내용");
        assert_eq!(record.emotion, Emotion::Happy);
    }

    #[test]
    fn retrospect_patch_only_sets_retrospect() {
        let patch = DiaryPatch::retrospect("돌아보니");
        assert!(!patch.is_empty());
        let mut record = sample();
        patch.apply_to(&mut record);
        assert_eq!(record.retrospect.as_deref(), Some("돌아보니"));
        assert_eq!(record.title, "제목");
    }
}
