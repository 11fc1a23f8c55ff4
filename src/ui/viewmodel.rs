//! View model types representing a renderable diary list.
//!
//! View models are created by [`derive_view`](crate::app::state::derive_view)
//! and consumed by the renderer. They contain no business logic, only
//! display-ready data.
//!
//! # Example
//!
//! ```rust
//! use daybook::app::{derive_view, ListQuery};
//!
//! let view = derive_view(&[], &ListQuery::default());
//! assert_eq!(view.total_pages, 1);
//! assert!(view.is_empty());
//! ```

use crate::domain::{DiaryRecord, Emotion};

/// Derived list state for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Every record passing the search term and emotion filter, in store order.
    pub filtered: Vec<DiaryRecord>,

    /// The slice of `filtered` shown on `page`.
    pub items: Vec<DiaryRecord>,

    /// Current page after clamping, 1-indexed.
    pub page: usize,

    /// `ceil(filtered.len() / PAGE_SIZE)`, never less than 1.
    pub total_pages: usize,

    /// Page numbers the pager shows, a block of up to ten containing `page`.
    pub pages: Vec<usize>,
}

impl ListView {
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Display cards for the current page.
    #[must_use]
    pub fn cards(&self) -> Vec<DiaryCard> {
        self.items.iter().map(DiaryCard::from_record).collect()
    }
}

/// One diary card in the list grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryCard {
    pub id: u64,
    pub title: String,
    pub emotion: Emotion,
    pub emotion_label: &'static str,
    pub date: String,
}

impl DiaryCard {
    #[must_use]
    pub fn from_record(record: &DiaryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            emotion: record.emotion,
            emotion_label: record.emotion.label(),
            date: record.display_date(),
        }
    }
}
