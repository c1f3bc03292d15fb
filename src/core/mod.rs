//! Core search and replace implementation
//!
//! Leaf-first: `expand` and `translate` are pure, `engine` and `cache` wrap
//! `fancy-regex`, `search` drives find/substitute, `replace` and `session`
//! build on top of it.

pub mod cache;
pub mod document;
pub mod engine;
pub mod expand;
pub mod replace;
pub mod search;
pub mod session;
pub mod translate;

// Re-export commonly used types
pub use document::{Document, EolMode, TextDocument};
pub use engine::{EngineConfig, EngineOptions, SearchError};
pub use expand::{expand, ExpandedTemplate, TemplateToken};
pub use replace::{replace_all, replace_next, Replacement};
pub use search::{FoundMatch, MatchResult, RegexSearch, SearchFlags, SearchRequest};
pub use session::{expand_template, find_in, replace_in, translate_pattern, FindOptions};
pub use translate::{translate, Translation};
