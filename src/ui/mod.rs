//! Presentation layer.
//!
//! ```text
//! records + ListQuery → derive_view → ListView → render_list → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready list state
//! - [`renderer`]: plain-text rendering for the console host

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_detail, render_list, render_pager};
pub use viewmodel::{DiaryCard, ListView};
