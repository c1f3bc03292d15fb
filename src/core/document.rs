//! Document abstraction consumed by the search driver
//!
//! The driver never owns text. It reads through the [`Document`] trait so an
//! editor can hand in its own buffer; [`TextDocument`] is the plain `String`
//! backed implementation used by the CLI and the tests.

use serde::{Deserialize, Serialize};

/// Line-ending convention of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolMode {
    /// `\n`
    #[default]
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl EolMode {
    /// Guess the convention from the first line ending in `text`.
    /// Text without any line ending is treated as LF.
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if bytes[i] == b'\n' => EolMode::Lf,
            Some(i) if bytes.get(i + 1) == Some(&b'\n') => EolMode::CrLf,
            Some(_) => EolMode::Cr,
            None => EolMode::Lf,
        }
    }
}

impl std::fmt::Display for EolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EolMode::Lf => write!(f, "lf"),
            EolMode::Cr => write!(f, "cr"),
            EolMode::CrLf => write!(f, "crlf"),
        }
    }
}

/// Read access to the text being searched
pub trait Document {
    /// Length in bytes
    fn length(&self) -> usize;

    /// Move `pos` so it does not sit inside a multi-byte character.
    ///
    /// A positive `move_dir` moves forward, otherwise backward. With
    /// `check_line_end`, a position between `\r` and `\n` is moved as well.
    fn move_position_outside_char(&self, pos: usize, move_dir: i32, check_line_end: bool)
        -> usize;

    /// Contiguous text starting at `position`, at most `range_length` bytes long
    fn range_pointer(&self, position: usize, range_length: usize) -> &str;

    /// Line-ending convention of the document
    fn eol_mode(&self) -> EolMode;
}

/// An owned UTF-8 document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    eol_mode: EolMode,
}

impl TextDocument {
    /// Create a document, detecting its EOL mode from the content
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let eol_mode = EolMode::detect(&text);
        Self { text, eol_mode }
    }

    /// Override the detected EOL mode
    pub fn with_eol_mode(mut self, eol_mode: EolMode) -> Self {
        self.eol_mode = eol_mode;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Replace `length` bytes at `position` with `replacement`.
    ///
    /// Both ends are snapped outward to character boundaries first.
    pub fn replace_range(&mut self, position: usize, length: usize, replacement: &str) {
        let start = self.move_position_outside_char(position, -1, false);
        let end = self.move_position_outside_char(position.saturating_add(length), 1, false);
        self.text.replace_range(start..end.max(start), replacement);
    }
}

impl Document for TextDocument {
    fn length(&self) -> usize {
        self.text.len()
    }

    fn move_position_outside_char(
        &self,
        pos: usize,
        move_dir: i32,
        check_line_end: bool,
    ) -> usize {
        let len = self.text.len();
        let mut pos = pos.min(len);

        if check_line_end && pos > 0 && pos < len {
            let bytes = self.text.as_bytes();
            if bytes[pos - 1] == b'\r' && bytes[pos] == b'\n' {
                return if move_dir > 0 { pos + 1 } else { pos - 1 };
            }
        }

        while !self.text.is_char_boundary(pos) {
            if move_dir > 0 {
                pos += 1;
            } else {
                pos -= 1;
            }
        }
        pos
    }

    fn range_pointer(&self, position: usize, range_length: usize) -> &str {
        let start = self.move_position_outside_char(position, -1, false);
        let end = self.move_position_outside_char(start.saturating_add(range_length), 1, false);
        &self.text[start..end]
    }

    fn eol_mode(&self) -> EolMode {
        self.eol_mode
    }
}
