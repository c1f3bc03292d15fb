//! Engine options and compilation
//!
//! The search driver talks in terms of editor-style engine options (ignore
//! case, dot-all, not-BOL, not-EOL, CRLF newlines). `fancy-regex` only has
//! switches for some of them, so the rest are lowered into the pattern text
//! here, right before the engine sees it.

use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

use super::translate::{rewrite, Rewrites};

/// `^` that cannot match at the very start of the document
const NOT_BOL_LINE_START: &str = r"(?:(?!\A)^)";
/// `$` before a `\r\n` pair or a lone `\n`, never between `\r` and `\n`
const CRLF_LINE_END: &str = r"(?:(?=\r\n)|(?<!\r)(?=\n)|\z)";
/// `$` that cannot match at the very end of the document
const NOT_EOL_LINE_END: &str = r"(?:(?!\z)$)";
const NOT_EOL_CRLF_LINE_END: &str = r"(?:(?=\r\n)|(?<!\r)(?=\n))";

/// Default backtracking budget per search, same as `fancy-regex`'s own default
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Errors reported by find and substitute
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    #[error("Regex engine fault: {0}")]
    EngineFault(String),

    #[error("No active match to substitute")]
    NoActiveMatch,
}

impl SearchError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidPattern(_) => "INVALID_PATTERN",
            SearchError::EngineFault(_) => "ENGINE_FAULT",
            SearchError::NoActiveMatch => "NO_ACTIVE_MATCH",
        }
    }
}

bitflags! {
    /// Compile options, part of the cache key
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EngineOptions: u32 {
        const IGNORE_CASE = 1 << 0;
        /// `.` also matches line breaks
        const DOT_ALL = 1 << 1;
        /// The document start is not a line start
        const NOT_BOL = 1 << 2;
        /// The document end is not a line end
        const NOT_EOL = 1 << 3;
        /// `$` matches before `\r\n` as well as `\n`
        const NEWLINE_CRLF = 1 << 4;
    }
}

impl EngineOptions {
    /// Lowercase names of the set options, in declaration order
    pub fn names(self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

impl fmt::Display for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Backtracking steps allowed per search before it fails as an engine fault
    pub backtrack_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

/// The exact pattern handed to `fancy-regex` for `text` under `options`.
///
/// `^`/`$` are always line anchors. Case and dot-all become inline flags;
/// CRLF, not-BOL and not-EOL become anchor rewrites.
pub fn engine_source(text: &str, options: EngineOptions) -> String {
    let crlf = options.contains(EngineOptions::NEWLINE_CRLF);
    let not_eol = options.contains(EngineOptions::NOT_EOL);

    let line_start = options
        .contains(EngineOptions::NOT_BOL)
        .then_some(NOT_BOL_LINE_START);
    let line_end = match (crlf, not_eol) {
        (false, false) => None,
        (true, false) => Some(CRLF_LINE_END),
        (false, true) => Some(NOT_EOL_LINE_END),
        (true, true) => Some(NOT_EOL_CRLF_LINE_END),
    };

    let mut source = String::from("(?m");
    if options.contains(EngineOptions::IGNORE_CASE) {
        source.push('i');
    }
    if options.contains(EngineOptions::DOT_ALL) {
        source.push('s');
    }
    source.push(')');

    if line_start.is_some() || line_end.is_some() {
        let rules = Rewrites {
            line_start,
            line_end,
            ..Rewrites::default()
        };
        source.push_str(&rewrite(text, &rules));
    } else {
        source.push_str(text);
    }
    source
}

/// Compile `text` under `options`
#[allow(clippy::result_large_err)]
pub fn compile(
    text: &str,
    options: EngineOptions,
    config: &EngineConfig,
) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    let source = engine_source(text, options);
    fancy_regex::RegexBuilder::new(&source)
        .backtrack_limit(config.backtrack_limit)
        .build()
}
