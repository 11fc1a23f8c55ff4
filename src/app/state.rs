//! Diary list derivation.
//!
//! [`derive_view`] turns the full record list plus a [`ListQuery`] into a
//! [`ListView`]: search, emotion filter and pagination in one pure pass. It is
//! called again whenever the records or the query change; nothing is cached.
//!
//! [`ListController`] owns the query for an interactive list and applies the
//! usual UX rule that changing the search or filter returns to page 1.
//!
//! # Ordering
//!
//! Results keep store order (oldest diary first). No sorting happens here.
//!
//! # Example
//!
//! ```rust
//! use daybook::app::{ListController, EmotionFilter};
//! use daybook::Emotion;
//!
//! let mut list = ListController::default();
//! list.set_emotion(EmotionFilter::Only(Emotion::Happy));
//! let view = list.view(&[]);
//! assert_eq!(view.page, 1);
//! ```

use super::modes::EmotionFilter;
use crate::domain::DiaryRecord;
use crate::ui::viewmodel::ListView;

/// Number of diaries per list page.
pub const PAGE_SIZE: usize = 12;

/// Number of page buttons the pager shows at once.
pub const PAGER_BLOCK: usize = 10;

/// Inputs of the list derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Matched case-insensitively against titles; empty matches everything.
    pub search: String,
    pub emotion: EmotionFilter,
    /// Requested page, 1-indexed. Out-of-range values are clamped.
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            emotion: EmotionFilter::All,
            page: 1,
        }
    }
}

/// Derives the filtered, paginated list view.
///
/// # Filtering Algorithm
///
/// 1. **Search**: keep records whose lowercased title contains the lowercased term
/// 2. **Emotion**: keep records matching the filter (`All` keeps everything)
/// 3. **Paging**: `total_pages = max(1, ceil(n / PAGE_SIZE))`, clamp the
///    requested page into `1..=total_pages`, slice
#[must_use]
pub fn derive_view(records: &[DiaryRecord], query: &ListQuery) -> ListView {
    let _span = tracing::debug_span!("derive_view",
        total_records = records.len(),
        query_len = query.search.len(),
        emotion = %query.emotion,
        page = query.page
    ).entered();

    let needle = query.search.to_lowercase();
    let filtered: Vec<DiaryRecord> = records
        .iter()
        .filter(|record| query.emotion.matches(record.emotion))
        .filter(|record| needle.is_empty() || record.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let total_pages = filtered.len().div_ceil(PAGE_SIZE).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(filtered.len());
    let items = filtered.get(start..end).map(<[_]>::to_vec).unwrap_or_default();

    tracing::debug!(
        filtered_count = filtered.len(),
        page = page,
        total_pages = total_pages,
        "list view derived"
    );

    ListView {
        filtered,
        items,
        page,
        total_pages,
        pages: pager_window(page, total_pages),
    }
}

/// Returns the block of page numbers containing `page`.
///
/// Blocks are `1..=10`, `11..=20`, ... truncated at `total_pages`.
fn pager_window(page: usize, total_pages: usize) -> Vec<usize> {
    let first = ((page - 1) / PAGER_BLOCK) * PAGER_BLOCK + 1;
    let last = (first + PAGER_BLOCK - 1).min(total_pages);
    (first..=last).collect()
}

/// Holds the list query for an interactive diary list.
#[derive(Debug, Clone, Default)]
pub struct ListController {
    query: ListQuery,
}

impl ListController {
    #[must_use]
    pub const fn new(query: ListQuery) -> Self {
        Self { query }
    }

    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Replaces the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.query.page = 1;
    }

    /// Replaces the emotion filter and returns to page 1.
    pub fn set_emotion(&mut self, filter: EmotionFilter) {
        self.query.emotion = filter;
        self.query.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.query.page = self.query.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.query.page = self.query.page.saturating_sub(1).max(1);
    }

    /// Derives the view and pins the stored page to the clamped one, so
    /// `next_page` after overshooting still moves from the last real page.
    pub fn view(&mut self, records: &[DiaryRecord]) -> ListView {
        let view = derive_view(records, &self.query);
        self.query.page = view.page;
        view
    }
}
