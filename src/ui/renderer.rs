//! Plain-text rendering of list and detail views.
//!
//! Rendering builds a `String` instead of printing so the output can be
//! asserted on; the CLI prints whatever these functions return.
//!
//! # Example
//!
//! ```rust
//! use daybook::app::{derive_view, ListQuery};
//! use daybook::ui::render_list;
//!
//! let query = ListQuery::default();
//! let out = render_list(&derive_view(&[], &query), &query);
//! assert!(out.contains("등록된 일기가 없습니다"));
//! ```

use crate::app::state::ListQuery;
use crate::app::EmotionFilter;
use crate::domain::DiaryRecord;
use crate::ui::viewmodel::ListView;
use std::fmt::Write;

const TITLE_COLUMN_WIDTH: usize = 30;

/// Renders the header, one line per diary card and the pager.
#[must_use]
pub fn render_list(view: &ListView, query: &ListQuery) -> String {
    let mut out = String::new();

    let _ = write!(out, " 일기 목록 ({}) ", view.total_count());
    if !query.search.is_empty() {
        let _ = write!(out, " 검색: \"{}\"", query.search);
    }
    if let EmotionFilter::Only(emotion) = query.emotion {
        let _ = write!(out, " 감정: {}", emotion.label());
    }
    out.push('\n');

    if view.is_empty() {
        out.push_str("등록된 일기가 없습니다.\n");
        return out;
    }

    for card in view.cards() {
        let _ = writeln!(
            out,
            "#{:<4} {:<8} {:<width$} {}",
            card.id,
            card.emotion_label,
            truncate(&card.title, TITLE_COLUMN_WIDTH),
            card.date,
            width = TITLE_COLUMN_WIDTH,
        );
    }

    out.push_str(&render_pager(view));
    out.push('\n');
    out
}

/// Renders `< 1 [2] 3 >` with the current page bracketed.
#[must_use]
pub fn render_pager(view: &ListView) -> String {
    let mut parts = Vec::with_capacity(view.pages.len() + 2);
    parts.push(if view.has_prev() { "<" } else { " " }.to_string());
    for &page in &view.pages {
        if page == view.page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    parts.push(if view.has_next() { ">" } else { " " }.to_string());
    parts.join(" ").trim_end().to_string()
}

/// Renders a full diary with its retrospect, if any.
#[must_use]
pub fn render_detail(record: &DiaryRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", record.id, record.title);
    let _ = writeln!(out, "{} | {}", record.emotion.label(), record.display_date());
    out.push('\n');
    let _ = writeln!(out, "{}", record.content);
    if let Some(retrospect) = &record.retrospect {
        out.push('\n');
        let _ = writeln!(out, "회고: {retrospect}");
    }
    out
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::derive_view;
    use crate::domain::{Emotion, NewDiary};

    fn records(n: u64) -> Vec<DiaryRecord> {
        (1..=n)
            .map(|id| {
                NewDiary::new(format!("일기 {id}"), "내용", Emotion::Happy)
                    .into_record(id, chrono::Utc::now())
            })
            .collect()
    }

    #[test]
    fn list_shows_count_and_cards() {
        let query = ListQuery::default();
        let out = render_list(&derive_view(&records(2), &query), &query);
        assert!(out.starts_with(" 일기 목록 (2) "));
        assert!(out.contains("#1"));
        assert!(out.contains("행복해요"));
    }

    #[test]
    fn pager_brackets_current_page() {
        let query = ListQuery {
            page: 2,
            ..ListQuery::default()
        };
        let view = derive_view(&records(25), &query);
        assert_eq!(render_pager(&view), "< 1 [2] 3 >");
    }

    #[test]
    fn single_page_pager_has_no_arrows() {
        let query = ListQuery::default();
        let view = derive_view(&records(1), &query);
        assert_eq!(render_pager(&view), "  [1]");
    }

    #[test]
    fn detail_includes_retrospect() {
        let mut record = records(1).remove(0);
        record.retrospect = Some("좋았다".into());
        let out = render_detail(&record);
        assert!(out.contains("회고: 좋았다"));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("가나다라마", 5), "가나다라마");
        assert_eq!(truncate("가나다라마바", 5), "가나...");
    }
}
