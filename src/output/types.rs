//! Output types for edrex commands
//!
//! All output structures are designed to be JSON-first.

use serde::{Deserialize, Serialize};

/// Text and offsets of one capture group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    /// Group number (1-indexed for capturing groups)
    pub group: usize,
    /// Captured text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
}

/// A single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Full matched text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// Match length in bytes
    pub length: usize,
    /// Capture groups that took part in the match
    pub captures: Vec<Capture>,
}

/// Result of `edrex find`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResult {
    /// The pattern as given
    pub pattern: String,
    /// The pattern as handed to the engine
    pub engine_pattern: String,
    /// Engine options in effect
    pub options: Vec<String>,
    /// "forward" or "backward"
    pub direction: String,
    /// Line-ending convention the search ran under
    pub eol_mode: String,
    /// Lower end of the searched range
    pub range_start: usize,
    /// Upper end of the searched range
    pub range_end: usize,
    /// Whether any match was found
    pub matched: bool,
    /// Number of matches reported
    pub match_count: usize,
    /// Matches in document order
    pub matches: Vec<Match>,
}

/// One splice made by `edrex replace`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Splice {
    /// Start byte position in the document at the time of the splice
    pub position: usize,
    /// Bytes removed
    pub removed: usize,
    /// Text inserted
    pub inserted: String,
}

/// Result of `edrex replace`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceResult {
    /// The pattern that was used
    pub pattern: String,
    /// The raw replacement template
    pub template: String,
    /// The template after escape expansion
    pub expanded_template: String,
    /// Number of replacements made
    pub replacements_made: usize,
    /// Each splice, in the order it was made
    pub replacements: Vec<Splice>,
    /// Document text after replacement
    pub result: String,
    /// File written back (with `--write`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Backup created before writing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
    /// Whether the file was modified
    pub written: bool,
}

/// Result of `edrex translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResult {
    /// The editor pattern
    pub pattern: String,
    /// Pattern text after editor-dialect translation
    pub translated: String,
    /// Exact source compiled by the engine (flags and anchor lowering applied)
    pub engine_source: String,
    /// Engine options in effect
    pub options: Vec<String>,
    /// Line-ending convention used
    pub eol_mode: String,
    /// Whether the pattern compiles
    pub valid: bool,
    /// Engine diagnostic when it does not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One piece of an expanded template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplatePart {
    /// Literal text
    Text(String),
    /// Reference to a capture group
    Group(u8),
}

/// Result of `edrex expand`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandResult {
    /// The raw template
    pub template: String,
    /// The template after escape expansion
    pub expanded: String,
    /// Literal text and group references, in order
    pub parts: Vec<TemplatePart>,
}

/// Error response (for structured error output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}
