//! edrex - editor-flavored regex find/replace
//!
//! Translates editor search patterns (`\<`, `\>`, whole-word, EOL-aware `$`)
//! for a backtracking engine, searches forward or backward over a document,
//! and expands replacement templates with `$n` / `\n` group references.

pub mod core;
pub mod output;

pub use crate::core::{
    Document, EolMode, MatchResult, RegexSearch, SearchError, SearchFlags, SearchRequest,
    TextDocument,
};
