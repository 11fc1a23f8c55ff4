//! Side effects requested by forms: dialogs to open and routes to visit.
//!
//! Forms never render or navigate themselves. They hand a [`Modal`] to the
//! host's [`ModalCapability`](crate::app::capability::ModalCapability) and a
//! [`Route`] to its [`Navigator`](crate::app::capability::Navigator).

use std::fmt;

/// Success dialog title after creating a diary.
pub const CREATED_TITLE: &str = "일기 등록 완료";
/// Success dialog title after editing a diary.
pub const UPDATED_TITLE: &str = "일기 수정 완료";
/// Success dialog title after deleting a diary.
pub const DELETED_TITLE: &str = "일기 삭제 완료";

/// Dialog content handed to the modal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// A mutation finished.
    Success { title: String },

    /// Ask the user to confirm an irreversible action.
    Confirm { title: String, message: String },

    /// The action needs a logged-in user.
    LoginPrompt,

    /// Something went wrong that the user should know about.
    Error { message: String },
}

impl Modal {
    pub fn success(title: impl Into<String>) -> Self {
        Self::Success {
            title: title.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Confirmation shown before deleting a diary.
    #[must_use]
    pub fn confirm_delete() -> Self {
        Self::Confirm {
            title: "일기 삭제".to_string(),
            message: "일기를 삭제 하시겠어요?".to_string(),
        }
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { title } => write!(f, "{title}"),
            Self::Confirm { title, message } => write!(f, "{title}: {message}"),
            Self::LoginPrompt => f.write_str("로그인이 필요합니다. 로그인 하시겠어요?"),
            Self::Error { message } => write!(f, "오류: {message}"),
        }
    }
}

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    DiaryList,
    DiaryDetail(u64),
    NewDiary,
    Login,
}

impl Route {
    /// Path of the route, e.g. `/diaries/3`.
    ///
    /// ```
    /// use daybook::app::Route;
    ///
    /// assert_eq!(Route::DiaryDetail(3).path(), "/diaries/3");
    /// assert_eq!(Route::DiaryList.path(), "/diaries");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::DiaryList => "/diaries".to_string(),
            Self::DiaryDetail(id) => format!("/diaries/{id}"),
            Self::NewDiary => "/diaries/new".to_string(),
            Self::Login => "/login".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
