//! Storage layer for persistent diary data.
//!
//! The diary list is one JSON entry inside a key-value [`StorageArea`]; the
//! [`Store`] trait is the capability the rest of the crate mutates it through.
//!
//! # Modules
//!
//! - `area`: key-value storage areas (files on disk, in-memory)
//! - `backend`: the `Store` trait
//! - `json`: `DiaryStore`, the JSON implementation of `Store`

pub mod area;
pub mod backend;
pub mod json;

pub use area::{FileArea, MemoryArea, StorageArea};
pub use backend::Store;
pub use json::{DiaryStore, DEFAULT_STORAGE_KEY};
